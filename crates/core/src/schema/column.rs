//! Column definition for table structures.

use crate::types::DataType;
use alloc::string::String;
use core::fmt;

/// Stable identifier of a column within its table structure.
///
/// Ids are handed out in declaration order and survive renames and
/// structure duplication, so indexes can refer to columns without holding them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnId(pub u32);

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A column definition in a table structure.
#[derive(Clone, Debug)]
pub struct Column {
    /// Column id, unique within the owning structure.
    id: ColumnId,
    /// Column name.
    name: String,
    /// Data type family of the column.
    data_type: DataType,
    /// Whether this column allows null values.
    nullable: bool,
}

impl Column {
    /// Creates a new column definition.
    pub fn new(id: ColumnId, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            id,
            name: name.into(),
            data_type,
            nullable: false,
        }
    }

    /// Sets whether this column is nullable.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Renames the column, keeping its id.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the column id.
    #[inline]
    pub fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the column name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the data type.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns whether this column is nullable.
    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.data_type == other.data_type
    }
}
