//! Shared helpers for editor integration tests.

#![allow(dead_code)]

use resultedit_core::schema::{TableBuilder, TableStructure};
use resultedit_core::{DataType, Value};
use resultedit_editor::{
    Dialect, EditorConfig, ExecutionError, Predicate, QueryData, QueryDataEditor, SqlExecutor,
    Statement, StatementKind,
};

/// Routes editor logs to the test harness output.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A single in-memory table that evaluates editor statements.
///
/// Rows are matched with SQL equality on every predicate term, so duplicate
/// rows are all affected, the way a real server would treat them.
pub struct MemoryTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub executed: Vec<String>,
    /// Statements whose SQL contains this text fail with `failure_message`.
    pub fail_when: Option<String>,
    pub failure_message: String,
}

impl MemoryTable {
    pub fn new(name: &str, columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            executed: Vec::new(),
            fail_when: None,
            failure_message: String::new(),
        }
    }

    pub fn insert(&mut self, values: Vec<Value>) {
        assert_eq!(values.len(), self.columns.len());
        self.rows.push(values);
    }

    pub fn fail_when(&mut self, needle: &str, message: &str) {
        self.fail_when = Some(needle.to_string());
        self.failure_message = message.to_string();
    }

    /// Builds a snapshot of the whole table, as `SELECT *` would.
    pub fn select_all(&self) -> QueryData {
        let mut data = QueryData::new(&self.name, self.columns.clone());
        for row in &self.rows {
            data.push_row(row.clone()).unwrap();
        }
        data
    }

    fn position(&self, column: &str) -> usize {
        self.columns
            .iter()
            .position(|c| c == column)
            .unwrap_or_else(|| panic!("unknown column {}", column))
    }

    fn matches(&self, row: &[Value], predicate: &Predicate) -> bool {
        predicate.terms().iter().all(|(column, value)| {
            let cell = &row[self.position(column)];
            !cell.is_null() && !value.is_null() && cell == value
        })
    }
}

impl SqlExecutor for MemoryTable {
    fn execute(&mut self, statement: &Statement) -> Result<u64, ExecutionError> {
        self.executed.push(statement.sql().to_string());
        if let Some(needle) = &self.fail_when {
            if statement.sql().contains(needle.as_str()) {
                return Err(ExecutionError::new(self.failure_message.clone()));
            }
        }
        assert_eq!(statement.table(), self.name);

        match statement.kind() {
            StatementKind::Update {
                assignments,
                predicate,
                ..
            } => {
                let hits: Vec<usize> = (0..self.rows.len())
                    .filter(|&i| self.matches(&self.rows[i], predicate))
                    .collect();
                for &i in &hits {
                    for (column, value) in assignments {
                        let pos = self.position(column);
                        self.rows[i][pos] = value.clone();
                    }
                }
                Ok(hits.len() as u64)
            }
            StatementKind::Delete { predicate, .. } => {
                let before = self.rows.len();
                let rows = std::mem::take(&mut self.rows);
                self.rows = rows
                    .into_iter()
                    .filter(|r| !self.matches(r, predicate))
                    .collect();
                Ok((before - self.rows.len()) as u64)
            }
        }
    }
}

/// `users(id PK, email UNIQUE, name)`.
pub fn users_structure() -> TableStructure {
    TableBuilder::new("users")
        .unwrap()
        .add_column("id", DataType::Integer)
        .unwrap()
        .add_column("email", DataType::Text)
        .unwrap()
        .add_column("name", DataType::Text)
        .unwrap()
        .add_nullable(&["email", "name"])
        .add_primary_key(&["id"])
        .unwrap()
        .add_unique("uq_email", &["email"])
        .unwrap()
        .build()
        .unwrap()
}

pub fn users_table() -> MemoryTable {
    let mut table = MemoryTable::new("users", &["id", "email", "name"]);
    table.insert(vec![1.into(), "a@x.com".into(), "Ann".into()]);
    table.insert(vec![2.into(), "b@x.com".into(), "Bob".into()]);
    table.insert(vec![3.into(), "c@x.com".into(), "Cy".into()]);
    table
}

/// `t(a, b)` with no key at all.
pub fn keyless_structure() -> TableStructure {
    TableBuilder::new("t")
        .unwrap()
        .add_column("a", DataType::Integer)
        .unwrap()
        .add_column("b", DataType::Integer)
        .unwrap()
        .build()
        .unwrap()
}

pub fn plain_editor() -> QueryDataEditor {
    QueryDataEditor::new(EditorConfig::new().dialect(Dialect::plain()))
}
