//! resultedit core - value types and table metadata for result-set editing.
//!
//! This crate provides the foundational types shared by the editor:
//!
//! - `DataType`: Column type families reported by the server
//! - `Value`: Typed, possibly-NULL cell values
//! - `schema`: Table metadata (Column, Index, TableStructure)
//! - `Error`: Error types for metadata and snapshot operations
//!
//! # Example
//!
//! ```rust
//! use resultedit_core::DataType;
//! use resultedit_core::schema::{IndexClass, TableBuilder};
//!
//! let table = TableBuilder::new("users")
//!     .unwrap()
//!     .add_column("id", DataType::Integer)
//!     .unwrap()
//!     .add_column("email", DataType::Text)
//!     .unwrap()
//!     .add_primary_key(&["id"])
//!     .unwrap()
//!     .add_unique("uq_email", &["email"])
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let pk = table.primary_key().unwrap();
//! assert_eq!(pk.name(), "PRIMARY KEY");
//! assert_eq!(pk.class(), IndexClass::PrimaryKey);
//! assert_eq!(pk.column_names(&table), vec!["id"]);
//! ```

#![no_std]

extern crate alloc;

mod error;
pub mod schema;
mod types;
mod value;

pub use error::{Error, Result};
pub use types::DataType;
pub use value::Value;
