//! resultedit editor - writes edits made to a query result back to its table.
//!
//! This crate turns in-memory changes to a fetched result set into
//! row-targeted statements:
//!
//! - `QueryData`: the snapshot of fetched rows with their pending edits
//! - `identify_row`: picks the primary key, a unique key, or the whole row
//!   to build the `WHERE` predicate for a row
//! - `Statement`: rendered `UPDATE`/`DELETE` text plus its structured form
//! - `SqlExecutor`: the seam to the connection that runs statements
//! - `QueryDataEditor`: the commit and delete protocol
//!
//! # Example
//!
//! ```rust
//! use resultedit_core::schema::TableBuilder;
//! use resultedit_core::DataType;
//! use resultedit_editor::{
//!     Dialect, EditorConfig, ExecutionError, QueryData, QueryDataEditor, Statement,
//! };
//!
//! let users = TableBuilder::new("users")
//!     .unwrap()
//!     .add_column("id", DataType::Integer)
//!     .unwrap()
//!     .add_column("name", DataType::Text)
//!     .unwrap()
//!     .add_primary_key(&["id"])
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let mut data = QueryData::new("users", vec!["id".into(), "name".into()]);
//! data.push_row(vec![1.into(), "Ann".into()]).unwrap();
//! data.set_cell(0, 1, "Anna".into()).unwrap();
//!
//! let mut sent = Vec::new();
//! let mut exec = |s: &Statement| -> Result<u64, ExecutionError> {
//!     sent.push(s.sql().to_string());
//!     Ok(1)
//! };
//!
//! let editor = QueryDataEditor::new(EditorConfig::new().dialect(Dialect::plain()));
//! let report = editor.apply_modifications_in_db(&users, &mut data, &mut exec);
//!
//! assert!(report.is_success());
//! assert_eq!(sent, vec!["UPDATE users SET name='Anna' WHERE id=1"]);
//! ```

mod config;
mod editor;
mod error;
mod executor;
mod identify;
mod logging;
mod report;
mod snapshot;
mod statement;

pub use config::{BinaryLiteral, Dialect, EditorConfig, QuoteStyle};
pub use editor::QueryDataEditor;
pub use error::{RowError, Severity};
pub use executor::{ExecutionError, SqlExecutor};
pub use identify::{identify_row, KeySource, Predicate};
pub use report::CommitReport;
pub use snapshot::{QueryData, RowState, SnapshotRow};
pub use statement::{Statement, StatementKind};
