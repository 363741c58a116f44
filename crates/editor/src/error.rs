//! Per-row failures of commit and delete operations.

use resultedit_core::Error;
use std::fmt;

/// How loudly a row failure must be surfaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Harmless race; the user decides what to do.
    Warning,
    /// The row was not written.
    Error,
    /// A statement touched more rows than intended; data may be damaged.
    Integrity,
}

/// Why a row could not be committed or deleted.
#[derive(Clone, Debug, PartialEq)]
pub enum RowError {
    /// Metadata or snapshot error (e.g. `ColumnNotFound`, row out of range).
    Metadata(Error),
    /// The snapshot cannot be written back to this table.
    NotEditable {
        table: String,
        row: Option<usize>,
        message: String,
    },
    /// No usable non-NULL column identifies the row; nothing was executed.
    UnidentifiableRow { table: String, row: usize },
    /// The statement affected no rows: the row changed or vanished on the server.
    StaleRow {
        table: String,
        row: usize,
        predicate: String,
        statement: String,
    },
    /// The statement affected more than one row.
    NonUniqueMatch {
        table: String,
        row: usize,
        predicate: String,
        statement: String,
        affected: u64,
    },
    /// The server rejected the statement.
    ExecutionFailure {
        table: String,
        row: usize,
        statement: String,
        message: String,
    },
    /// Delete requested with no current row.
    NoCurrentRow { table: String },
}

impl RowError {
    /// Returns the severity of this failure.
    pub fn severity(&self) -> Severity {
        match self {
            RowError::StaleRow { .. } => Severity::Warning,
            RowError::NonUniqueMatch { .. } => Severity::Integrity,
            _ => Severity::Error,
        }
    }

    /// Returns the snapshot position of the offending row, if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            RowError::Metadata(Error::RowOutOfRange { row, .. }) => Some(*row),
            RowError::Metadata(_) | RowError::NoCurrentRow { .. } => None,
            RowError::NotEditable { row, .. } => *row,
            RowError::UnidentifiableRow { row, .. }
            | RowError::StaleRow { row, .. }
            | RowError::NonUniqueMatch { row, .. }
            | RowError::ExecutionFailure { row, .. } => Some(*row),
        }
    }

    /// Returns the statement that was executed, if one was.
    pub fn statement(&self) -> Option<&str> {
        match self {
            RowError::StaleRow { statement, .. }
            | RowError::NonUniqueMatch { statement, .. }
            | RowError::ExecutionFailure { statement, .. } => Some(statement.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowError::Metadata(err) => write!(f, "{}", err),
            RowError::NotEditable {
                table,
                row: Some(row),
                message,
            } => write!(f, "Row {} of {} is not editable: {}", row, table, message),
            RowError::NotEditable {
                table,
                row: None,
                message,
            } => write!(f, "Result set of {} is not editable: {}", table, message),
            RowError::UnidentifiableRow { table, row } => write!(
                f,
                "Row {} of {} cannot be identified: no non-NULL column to match on",
                row, table
            ),
            RowError::StaleRow {
                table,
                row,
                predicate,
                ..
            } => write!(
                f,
                "Row {} of {} was changed or deleted by another session (no row matches {})",
                row, table, predicate
            ),
            RowError::NonUniqueMatch {
                table,
                row,
                predicate,
                affected,
                ..
            } => write!(
                f,
                "Row {} of {}: {} rows matched {}; all of them were modified",
                row, table, affected, predicate
            ),
            RowError::ExecutionFailure {
                table,
                row,
                message,
                ..
            } => write!(f, "Row {} of {} failed: {}", row, table, message),
            RowError::NoCurrentRow { table } => {
                write!(f, "No current row selected in result of {}", table)
            }
        }
    }
}

impl std::error::Error for RowError {}

impl From<Error> for RowError {
    fn from(err: Error) -> Self {
        RowError::Metadata(err)
    }
}
