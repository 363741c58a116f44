//! The seam to the SQL execution layer.

use crate::statement::Statement;
use std::fmt;

/// Driver-level failure reported by the server or connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionError {
    message: String,
}

impl ExecutionError {
    /// Creates an error carrying the driver message verbatim.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the driver message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExecutionError {}

/// Synchronous statement execution over the active session.
///
/// Implementations send [`Statement::sql`] and report the server's
/// affected-row count. The editor issues one statement at a time.
pub trait SqlExecutor {
    /// Executes a statement and returns the number of affected rows.
    fn execute(&mut self, statement: &Statement) -> Result<u64, ExecutionError>;
}

impl<F> SqlExecutor for F
where
    F: FnMut(&Statement) -> Result<u64, ExecutionError>,
{
    fn execute(&mut self, statement: &Statement) -> Result<u64, ExecutionError> {
        self(statement)
    }
}
