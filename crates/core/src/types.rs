//! Data type definitions for result-set columns.
//!
//! This module defines the column types a server reports for a table, folded
//! into the handful of families the editor needs to tell apart.

/// Column data type family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Boolean type (BOOL, BIT(1))
    Boolean,
    /// Any integer width
    Integer,
    /// Approximate numeric (FLOAT, DOUBLE, REAL)
    Float,
    /// Exact numeric (DECIMAL, NUMERIC)
    Decimal,
    /// Character data (CHAR, VARCHAR, TEXT, ENUM)
    Text,
    /// Date, time and timestamp types
    DateTime,
    /// Binary data (BLOB, BYTEA, VARBINARY)
    Binary,
    /// JSON documents
    Json,
}

impl DataType {
    /// Returns whether `column = literal` reliably matches a stored value.
    ///
    /// Approximate floats may not round-trip through their text form, and
    /// JSON compares as a document rather than as the literal text.
    pub fn matches_exactly(&self) -> bool {
        !matches!(self, DataType::Float | DataType::Json)
    }
}
