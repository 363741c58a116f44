//! Table structure: the columns and indexes of one table.

use super::column::{Column, ColumnId};
use super::index::{Index, IndexClass, IndexType};
use crate::error::{Error, Result};
use crate::types::DataType;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// The columns and indexes of a table, as loaded from the server.
#[derive(Clone, Debug)]
pub struct TableStructure {
    /// Table name.
    name: String,
    /// Column definitions, in table order.
    columns: Vec<Column>,
    /// Index definitions, in declaration order.
    indexes: Vec<Index>,
    /// Next column id to hand out.
    next_column_id: u32,
}

impl TableStructure {
    /// Creates an empty table structure.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
            next_column_id: 0,
        }
    }

    /// Returns the table name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the columns.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the indexes, in declaration order.
    #[inline]
    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    /// Gets a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Gets a column by id.
    pub fn column_by_id(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id() == id)
    }

    /// Adds a column and returns its id.
    pub fn add_column(&mut self, name: impl Into<String>, data_type: DataType) -> Result<ColumnId> {
        let name = name.into();
        if self.column_by_name(&name).is_some() {
            return Err(Error::invalid_schema(format!(
                "Column already exists: {}",
                name
            )));
        }
        let id = ColumnId(self.next_column_id);
        self.next_column_id += 1;
        self.columns.push(Column::new(id, name, data_type));
        Ok(id)
    }

    /// Renames a column; indexes follow because they hold the id.
    pub fn rename_column(&mut self, id: ColumnId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.columns.iter().any(|c| c.name() == name && c.id() != id) {
            return Err(Error::invalid_schema(format!(
                "Column already exists: {}",
                name
            )));
        }
        let table = self.name.clone();
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or_else(|| Error::column_not_found(table, format!("{}", id)))?;
        column.set_name(name);
        Ok(())
    }

    /// Gets an index by its stored name.
    pub fn index_by_name(&self, name: &str) -> Option<&Index> {
        self.indexes.iter().find(|i| i.raw_name() == name)
    }

    /// Adds an index owned by this structure.
    ///
    /// The index must be bound to this table and every member id must exist.
    /// A table holds at most one primary key.
    pub fn add_index(&mut self, index: Index) -> Result<()> {
        if index.table_name() != self.name {
            return Err(Error::invalid_operation(format!(
                "index {} belongs to table {}, not {}",
                index.raw_name(),
                index.table_name(),
                self.name
            )));
        }
        if let Some(missing) = index
            .columns()
            .iter()
            .find(|id| self.column_by_id(**id).is_none())
        {
            return Err(Error::column_not_found(&self.name, format!("{}", missing)));
        }
        if index.class() == IndexClass::PrimaryKey && self.primary_key().is_some() {
            return Err(Error::invalid_schema(format!(
                "Table {} already has a primary key",
                self.name
            )));
        }
        self.indexes.push(index);
        Ok(())
    }

    /// Removes an index by its stored name.
    pub fn remove_index(&mut self, name: &str) -> Result<Index> {
        let pos = self
            .indexes
            .iter()
            .position(|i| i.raw_name() == name)
            .ok_or_else(|| Error::index_not_found(&self.name, name))?;
        Ok(self.indexes.remove(pos))
    }

    /// Returns the primary key index if defined.
    pub fn primary_key(&self) -> Option<&Index> {
        self.indexes
            .iter()
            .find(|i| i.class() == IndexClass::PrimaryKey)
    }

    /// Returns the unique indexes, in declaration order.
    pub fn unique_indexes(&self) -> impl Iterator<Item = &Index> {
        self.indexes
            .iter()
            .filter(|i| i.class() == IndexClass::Unique)
    }

    /// Duplicates this structure under a new name.
    ///
    /// Columns keep their ids and every index is rebound to the duplicate, so
    /// altering the copy never touches this structure.
    pub fn deep_copy(&self, name: impl Into<String>) -> TableStructure {
        let mut copy = TableStructure {
            name: name.into(),
            columns: self.columns.clone(),
            indexes: Vec::with_capacity(self.indexes.len()),
            next_column_id: self.next_column_id,
        };
        copy.indexes = self.indexes.iter().map(|i| i.deep_copy(&copy)).collect();
        copy
    }
}

struct PendingIndex {
    name: String,
    class: IndexClass,
    index_type: IndexType,
    columns: Vec<String>,
}

/// Builder for creating table structures.
pub struct TableBuilder {
    structure: TableStructure,
    indexes: Vec<PendingIndex>,
}

impl TableBuilder {
    /// Creates a new table builder.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::check_naming_rules(&name)?;
        Ok(Self {
            structure: TableStructure::new(name),
            indexes: Vec::new(),
        })
    }

    /// Validates an identifier. Servers accept almost anything once quoted,
    /// so only empty names and control characters are refused.
    fn check_naming_rules(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::invalid_schema("Name cannot be empty"));
        }
        if name.chars().any(|c| c.is_control()) {
            return Err(Error::invalid_schema(format!(
                "Name contains control characters: {:?}",
                name
            )));
        }
        Ok(())
    }

    /// Adds a column to the table.
    pub fn add_column(mut self, name: impl Into<String>, data_type: DataType) -> Result<Self> {
        let name = name.into();
        Self::check_naming_rules(&name)?;
        self.structure.add_column(name, data_type)?;
        Ok(self)
    }

    /// Marks columns as nullable.
    pub fn add_nullable(mut self, columns: &[&str]) -> Self {
        for name in columns {
            if let Some(col) = self.structure.columns.iter_mut().find(|c| c.name() == *name) {
                *col = col.clone().nullable(true);
            }
        }
        self
    }

    /// Sets the primary key.
    pub fn add_primary_key(self, columns: &[&str]) -> Result<Self> {
        if self.indexes.iter().any(|i| i.class == IndexClass::PrimaryKey) {
            return Err(Error::invalid_schema(format!(
                "Table {} already has a primary key",
                self.structure.name()
            )));
        }
        self.add_index("PRIMARY", IndexClass::PrimaryKey, IndexType::BTree, columns)
    }

    /// Adds a unique constraint.
    pub fn add_unique(self, name: impl Into<String>, columns: &[&str]) -> Result<Self> {
        self.add_index(name, IndexClass::Unique, IndexType::BTree, columns)
    }

    /// Adds an index of any class.
    pub fn add_index(
        mut self,
        name: impl Into<String>,
        class: IndexClass,
        index_type: IndexType,
        columns: &[&str],
    ) -> Result<Self> {
        let name = name.into();
        if class != IndexClass::PrimaryKey {
            Self::check_naming_rules(&name)?;
        }
        if columns.is_empty() {
            return Err(Error::invalid_schema(format!("Index {} has no columns", name)));
        }
        self.indexes.push(PendingIndex {
            name,
            class,
            index_type,
            columns: columns.iter().map(|c| String::from(*c)).collect(),
        });
        Ok(self)
    }

    /// Builds the table structure, resolving index columns by name.
    pub fn build(self) -> Result<TableStructure> {
        let mut structure = self.structure;
        for pending in self.indexes {
            let mut index =
                Index::new(&structure, pending.name, pending.class).index_type(pending.index_type);
            for column in &pending.columns {
                index.add_column(&structure, column)?;
            }
            structure.add_index(index)?;
        }
        Ok(structure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn users() -> TableStructure {
        TableBuilder::new("users")
            .unwrap()
            .add_column("id", DataType::Integer)
            .unwrap()
            .add_column("email", DataType::Text)
            .unwrap()
            .add_column("name", DataType::Text)
            .unwrap()
            .add_nullable(&["name"])
            .add_primary_key(&["id"])
            .unwrap()
            .add_unique("uq_email", &["email"])
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_table_builder() {
        let table = users();
        assert_eq!(table.name(), "users");
        assert_eq!(table.columns().len(), 3);
        assert_eq!(table.indexes().len(), 2);
        assert!(table.primary_key().is_some());
        assert_eq!(table.unique_indexes().count(), 1);
        assert!(table.column_by_name("name").unwrap().is_nullable());
        assert!(!table.column_by_name("id").unwrap().is_nullable());
    }

    #[test]
    fn test_column_lookup() {
        let table = users();
        let email = table.column_by_name("email").unwrap();
        assert_eq!(email.id(), ColumnId(1));
        assert_eq!(table.column_by_id(ColumnId(1)).unwrap().name(), "email");
        assert!(table.column_by_name("unknown").is_none());
        assert!(table.column_by_id(ColumnId(42)).is_none());
    }

    #[test]
    fn test_primary_key_columns() {
        let table = users();
        let pk = table.primary_key().unwrap();
        assert_eq!(pk.name(), "PRIMARY KEY");
        assert_eq!(pk.column_names(&table), vec!["id"]);
    }

    #[test]
    fn test_index_on_unknown_column() {
        let result = TableBuilder::new("t")
            .unwrap()
            .add_column("a", DataType::Integer)
            .unwrap()
            .add_unique("uq_b", &["b"])
            .unwrap()
            .build();
        assert_eq!(result.unwrap_err(), Error::column_not_found("t", "b"));
    }

    #[test]
    fn test_duplicate_column() {
        let result = TableBuilder::new("test")
            .unwrap()
            .add_column("id", DataType::Integer)
            .unwrap()
            .add_column("id", DataType::Integer);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_name() {
        assert!(TableBuilder::new("  ").is_err());
        assert!(TableBuilder::new("bad\nname").is_err());
        assert!(TableBuilder::new("order-items").is_ok());
    }

    #[test]
    fn test_second_primary_key_rejected() {
        let result = TableBuilder::new("t")
            .unwrap()
            .add_column("a", DataType::Integer)
            .unwrap()
            .add_primary_key(&["a"])
            .unwrap()
            .add_primary_key(&["a"]);
        assert!(result.is_err());

        let mut table = users();
        let mut pk = Index::new(&table, "pk2", IndexClass::PrimaryKey);
        pk.add_column(&table, "email").unwrap();
        assert!(matches!(table.add_index(pk), Err(Error::InvalidSchema { .. })));
    }

    #[test]
    fn test_rename_column_keeps_indexes() {
        let mut table = users();
        let id = table.column_by_name("email").unwrap().id();
        table.rename_column(id, "mail").unwrap();
        let uq = table.index_by_name("uq_email").unwrap();
        assert_eq!(uq.column_names(&table), vec!["mail"]);
        assert!(table.rename_column(id, "id").is_err());
    }

    #[test]
    fn test_remove_index() {
        let mut table = users();
        let removed = table.remove_index("uq_email").unwrap();
        assert_eq!(removed.class(), IndexClass::Unique);
        assert_eq!(table.unique_indexes().count(), 0);
        assert_eq!(
            table.remove_index("uq_email").unwrap_err(),
            Error::index_not_found("users", "uq_email")
        );
    }

    #[test]
    fn test_deep_copy() {
        let table = users();
        let mut copy = table.deep_copy("users_new");
        assert_eq!(copy.name(), "users_new");
        assert!(copy.indexes().iter().all(|i| i.table_name() == "users_new"));

        copy.remove_index("uq_email").unwrap();
        copy.add_column("age", DataType::Integer).unwrap();
        assert_eq!(table.indexes().len(), 2);
        assert_eq!(table.columns().len(), 3);
        assert_eq!(copy.column_by_name("age").unwrap().id(), ColumnId(3));
    }
}
