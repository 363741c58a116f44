//! Row-targeted `UPDATE` and `DELETE` statements.

use crate::config::Dialect;
use crate::identify::Predicate;
use resultedit_core::Value;
use std::fmt;

/// What a statement does, in structured form.
#[derive(Clone, Debug, PartialEq)]
pub enum StatementKind {
    /// `UPDATE <table> SET <assignments> WHERE <predicate>`
    Update {
        table: String,
        assignments: Vec<(String, Value)>,
        predicate: Predicate,
    },
    /// `DELETE FROM <table> WHERE <predicate>`
    Delete { table: String, predicate: Predicate },
}

/// A statement ready to be sent to the server.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    kind: StatementKind,
    sql: String,
}

impl Statement {
    /// Builds an `UPDATE` of the given columns of one row.
    pub fn update(
        table: &str,
        assignments: Vec<(String, Value)>,
        predicate: Predicate,
        dialect: &Dialect,
    ) -> Self {
        let set = assignments
            .iter()
            .map(|(column, value)| {
                format!(
                    "{}={}",
                    dialect.quote_identifier(column),
                    dialect.literal(value)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            dialect.quote_identifier(table),
            set,
            predicate.render(dialect)
        );
        Self {
            kind: StatementKind::Update {
                table: table.to_string(),
                assignments,
                predicate,
            },
            sql,
        }
    }

    /// Builds a `DELETE` of one row.
    pub fn delete(table: &str, predicate: Predicate, dialect: &Dialect) -> Self {
        let sql = format!(
            "DELETE FROM {} WHERE {}",
            dialect.quote_identifier(table),
            predicate.render(dialect)
        );
        Self {
            kind: StatementKind::Delete {
                table: table.to_string(),
                predicate,
            },
            sql,
        }
    }

    /// Returns the SQL text.
    #[inline]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the structured form.
    #[inline]
    pub fn kind(&self) -> &StatementKind {
        &self.kind
    }

    /// Returns the target table.
    pub fn table(&self) -> &str {
        match &self.kind {
            StatementKind::Update { table, .. } | StatementKind::Delete { table, .. } => table,
        }
    }

    /// Returns the identification predicate.
    pub fn predicate(&self) -> &Predicate {
        match &self.kind {
            StatementKind::Update { predicate, .. } | StatementKind::Delete { predicate, .. } => {
                predicate
            }
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identify::identify_row;
    use crate::snapshot::QueryData;
    use resultedit_core::schema::TableBuilder;
    use resultedit_core::DataType;

    fn predicate(values: Vec<Value>) -> Predicate {
        let table = TableBuilder::new("t")
            .unwrap()
            .add_column("a", DataType::Integer)
            .unwrap()
            .add_column("b", DataType::Text)
            .unwrap()
            .build()
            .unwrap();
        let mut data = QueryData::new("t", vec!["a".into(), "b".into()]);
        data.push_row(values).unwrap();
        identify_row(&table, &data, 0, true).unwrap()
    }

    #[test]
    fn test_update_sql() {
        let stmt = Statement::update(
            "t",
            vec![("b".into(), Value::from("x")), ("a".into(), Value::Null)],
            predicate(vec![1.into(), "y".into()]),
            &Dialect::plain(),
        );
        assert_eq!(stmt.sql(), "UPDATE t SET b='x', a=NULL WHERE a=1 AND b='y'");
        assert_eq!(stmt.table(), "t");
        assert_eq!(stmt.predicate().terms().len(), 2);
    }

    #[test]
    fn test_delete_sql_quoted() {
        let stmt = Statement::delete(
            "t",
            predicate(vec![1.into(), Value::Null]),
            &Dialect::mysql(),
        );
        assert_eq!(stmt.to_string(), "DELETE FROM `t` WHERE `a`=1");
        assert!(matches!(stmt.kind(), StatementKind::Delete { .. }));
    }
}
