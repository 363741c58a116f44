//! Index metadata for table structures.
//!
//! An [`Index`] describes one index or key constraint on a table: its class
//! (constraint role), its engine-level type and its ordered column list.
//! Columns are stored as [`ColumnId`]s and resolved lazily through the owning
//! [`TableStructure`], which callers pass in whenever names are needed.

use super::column::{Column, ColumnId};
use super::table::TableStructure;
use crate::error::{Error, Result};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Constraint role of an index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum IndexClass {
    /// Unknown or unrecognized class.
    #[default]
    None,
    /// The table's primary key.
    PrimaryKey,
    /// Plain, non-unique key.
    Key,
    /// Unique key.
    Unique,
    /// Full-text index.
    FullText,
    /// Spatial index.
    Spatial,
}

impl IndexClass {
    /// Tokens of every known class, in declaration order.
    pub const TOKENS: [&'static str; 5] = ["PRIMARY", "KEY", "UNIQUE", "FULLTEXT", "SPATIAL"];

    const ALL: [IndexClass; 5] = [
        IndexClass::PrimaryKey,
        IndexClass::Key,
        IndexClass::Unique,
        IndexClass::FullText,
        IndexClass::Spatial,
    ];

    /// Parses a class token, ignoring case.
    ///
    /// Unknown tokens yield [`IndexClass::None`] so that keywords from newer
    /// server versions degrade instead of failing metadata parsing.
    pub fn from_token(token: &str) -> Self {
        Self::TOKENS
            .iter()
            .position(|t| t.eq_ignore_ascii_case(token))
            .map(|i| Self::ALL[i])
            .unwrap_or(IndexClass::None)
    }

    /// Returns the class token; `None` serializes as "NONE".
    pub fn as_token(&self) -> &'static str {
        match self {
            IndexClass::PrimaryKey => "PRIMARY",
            IndexClass::Key => "KEY",
            IndexClass::Unique => "UNIQUE",
            IndexClass::FullText => "FULLTEXT",
            IndexClass::Spatial => "SPATIAL",
            IndexClass::None => "NONE",
        }
    }
}

impl fmt::Display for IndexClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Engine-level storage algorithm of an index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum IndexType {
    /// Unspecified.
    #[default]
    None,
    /// B-tree.
    BTree,
    /// Hash table.
    Hash,
    /// R-tree.
    RTree,
}

impl IndexType {
    /// Tokens of every known type, in declaration order.
    pub const TOKENS: [&'static str; 3] = ["BTREE", "HASH", "RTREE"];

    const ALL: [IndexType; 3] = [IndexType::BTree, IndexType::Hash, IndexType::RTree];

    /// Parses a type token, ignoring case. Unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Self {
        Self::TOKENS
            .iter()
            .position(|t| t.eq_ignore_ascii_case(token))
            .map(|i| Self::ALL[i])
            .unwrap_or(IndexType::None)
    }

    /// Returns the type token; `None` serializes as "NONE".
    pub fn as_token(&self) -> &'static str {
        match self {
            IndexType::BTree => "BTREE",
            IndexType::Hash => "HASH",
            IndexType::RTree => "RTREE",
            IndexType::None => "NONE",
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// An index or key constraint of a table structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Index {
    /// Name of the owning table structure.
    table: String,
    /// Stored index name; empty for an implicit primary key.
    name: String,
    class: IndexClass,
    index_type: IndexType,
    /// Member columns, in index order.
    columns: Vec<ColumnId>,
}

impl Index {
    /// Creates an empty index bound to `table`.
    pub fn new(table: &TableStructure, name: impl Into<String>, class: IndexClass) -> Self {
        Self {
            table: table.name().into(),
            name: name.into(),
            class,
            index_type: IndexType::None,
            columns: Vec::new(),
        }
    }

    /// Sets the index type.
    pub fn index_type(mut self, index_type: IndexType) -> Self {
        self.index_type = index_type;
        self
    }

    /// Returns the display name.
    ///
    /// A primary key is always called "PRIMARY KEY", whatever its stored name.
    pub fn name(&self) -> &str {
        if self.class == IndexClass::PrimaryKey {
            "PRIMARY KEY"
        } else {
            &self.name
        }
    }

    /// Returns the stored name.
    #[inline]
    pub fn raw_name(&self) -> &str {
        &self.name
    }

    /// Sets the stored name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the name of the owning table structure.
    #[inline]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Returns the index class.
    #[inline]
    pub fn class(&self) -> IndexClass {
        self.class
    }

    /// Sets the index class.
    pub fn set_class(&mut self, class: IndexClass) {
        self.class = class;
    }

    /// Returns the index type.
    #[inline]
    pub fn get_index_type(&self) -> IndexType {
        self.index_type
    }

    /// Sets the index type.
    pub fn set_index_type(&mut self, index_type: IndexType) {
        self.index_type = index_type;
    }

    /// Returns the member column ids, in index order.
    #[inline]
    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    /// Returns the number of member columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns whether this index uniquely identifies rows when its columns are non-NULL.
    #[inline]
    pub fn is_identifying(&self) -> bool {
        matches!(self.class, IndexClass::PrimaryKey | IndexClass::Unique)
    }

    /// Appends the column called `name`, looked up in `structure`.
    ///
    /// Returns the new (1-based) column count, or `ColumnNotFound` when the
    /// structure has no such column; in that case the index is left unchanged.
    pub fn add_column(&mut self, structure: &TableStructure, name: &str) -> Result<usize> {
        if structure.name() != self.table {
            return Err(Error::invalid_operation(format!(
                "index {} belongs to table {}, not {}",
                self.name,
                self.table,
                structure.name()
            )));
        }
        let column = structure
            .column_by_name(name)
            .ok_or_else(|| Error::column_not_found(structure.name(), name))?;
        self.columns.push(column.id());
        Ok(self.columns.len())
    }

    /// Removes the column at `position`, returning its id.
    pub fn remove_column(&mut self, position: usize) -> Option<ColumnId> {
        if position < self.columns.len() {
            Some(self.columns.remove(position))
        } else {
            None
        }
    }

    /// Removes all member columns.
    pub fn clear_columns(&mut self) {
        self.columns.clear();
    }

    /// Resolves the member columns through `structure`.
    ///
    /// Returns None if any member id no longer exists in the structure.
    pub fn resolve<'a>(&self, structure: &'a TableStructure) -> Option<Vec<&'a Column>> {
        self.columns
            .iter()
            .map(|id| structure.column_by_id(*id))
            .collect()
    }

    /// Returns the member column names; ids missing from `structure` resolve to "".
    pub fn column_names(&self, structure: &TableStructure) -> Vec<String> {
        self.columns
            .iter()
            .map(|id| {
                structure
                    .column_by_id(*id)
                    .map(|c| String::from(c.name()))
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Rebinds this index to another table structure.
    pub fn rebind(&mut self, table: &TableStructure) {
        self.table = table.name().into();
    }

    /// Creates an independent copy of this index bound to `target`.
    ///
    /// Column ids are carried over in order and resolve through `target`
    /// from now on; later changes to either index never affect the other.
    pub fn deep_copy(&self, target: &TableStructure) -> Index {
        Index {
            table: target.name().into(),
            name: self.name.clone(),
            class: self.class,
            index_type: self.index_type,
            columns: self.columns.clone(),
        }
    }

    /// Returns a diagnostics rendering that resolves column names through `structure`.
    pub fn display<'a>(&'a self, structure: &'a TableStructure) -> IndexDisplay<'a> {
        IndexDisplay {
            index: self,
            structure,
        }
    }
}

/// Diagnostics view of an [`Index`]: `name:<name> class:<CLASS>[ type:<TYPE>][ columns:a,b]`.
pub struct IndexDisplay<'a> {
    index: &'a Index,
    structure: &'a TableStructure,
}

impl fmt::Display for IndexDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "name:{} class:{}", self.index.name, self.index.class)?;
        if self.index.index_type != IndexType::None {
            write!(f, " type:{}", self.index.index_type)?;
        }
        if !self.index.columns.is_empty() {
            f.write_str(" columns:")?;
            for (i, name) in self.index.column_names(self.structure).iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                f.write_str(name)?;
            }
        }
        Ok(())
    }
}
