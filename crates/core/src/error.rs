//! Error types for table metadata and snapshot operations.

use alloc::string::String;
use core::fmt;

/// Result type alias for core operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for table metadata and snapshot operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Column not found in the table structure.
    ColumnNotFound {
        table: String,
        column: String,
    },
    /// Index not found in the table structure.
    IndexNotFound {
        table: String,
        index: String,
    },
    /// Invalid schema definition.
    InvalidSchema {
        message: String,
    },
    /// Row position outside the snapshot.
    RowOutOfRange {
        row: usize,
        len: usize,
    },
    /// Column position outside the result set.
    CellOutOfRange {
        column: usize,
        len: usize,
    },
    /// Invalid operation.
    InvalidOperation {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ColumnNotFound { table, column } => {
                write!(f, "Column {} not found in table {}", column, table)
            }
            Error::IndexNotFound { table, index } => {
                write!(f, "Index {} not found in table {}", index, table)
            }
            Error::InvalidSchema { message } => {
                write!(f, "Invalid schema: {}", message)
            }
            Error::RowOutOfRange { row, len } => {
                write!(f, "Row {} out of range (snapshot has {} rows)", row, len)
            }
            Error::CellOutOfRange { column, len } => {
                write!(
                    f,
                    "Column {} out of range (result set has {} columns)",
                    column, len
                )
            }
            Error::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates a column not found error.
    pub fn column_not_found(table: impl Into<String>, column: impl Into<String>) -> Self {
        Error::ColumnNotFound {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Creates an index not found error.
    pub fn index_not_found(table: impl Into<String>, index: impl Into<String>) -> Self {
        Error::IndexNotFound {
            table: table.into(),
            index: index.into(),
        }
    }

    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Error::InvalidSchema {
            message: message.into(),
        }
    }

    /// Creates a row out of range error.
    pub fn row_out_of_range(row: usize, len: usize) -> Self {
        Error::RowOutOfRange { row, len }
    }

    /// Creates a cell out of range error.
    pub fn cell_out_of_range(column: usize, len: usize) -> Self {
        Error::CellOutOfRange { column, len }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Error::InvalidOperation {
            message: message.into(),
        }
    }
}
