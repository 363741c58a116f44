//! Schema module: table metadata consumed by the result-set editor.
//!
//! This module contains the column, index and table structure definitions
//! the editor uses to decide how a fetched row can be re-identified.

mod column;
mod index;
mod table;

pub use column::{Column, ColumnId};
pub use index::{Index, IndexClass, IndexDisplay, IndexType};
pub use table::{TableBuilder, TableStructure};
