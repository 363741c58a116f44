//! Row identification: choosing the `WHERE` predicate that re-targets a fetched row.
//!
//! Candidates are tried in a fixed order:
//!
//! 1. the primary key, if every member column is in the result set with a
//!    non-NULL original value;
//! 2. the first unique index (declaration order) meeting the same condition;
//! 3. every result column that belongs to the table, has a type that compares
//!    exactly, and holds a non-NULL original value ("whole row").
//!
//! NULL columns never appear in a predicate, since `col = NULL` matches nothing.
//! Only original values are used: pending edits are not on the server yet.

use crate::config::Dialect;
use crate::error::RowError;
use crate::snapshot::QueryData;
use resultedit_core::schema::{Index, TableStructure};
use resultedit_core::Value;
use std::fmt;

/// Which column set a predicate was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeySource {
    /// The primary key.
    PrimaryKey,
    /// A unique index, by stored name.
    Unique(String),
    /// All non-NULL columns of the row.
    WholeRow,
}

/// A conjunction of `column = value` terms identifying one row.
#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    source: KeySource,
    terms: Vec<(String, Value)>,
}

impl Predicate {
    /// Returns the key the predicate was built from.
    #[inline]
    pub fn source(&self) -> &KeySource {
        &self.source
    }

    /// Returns the `(column, value)` terms, in key order.
    #[inline]
    pub fn terms(&self) -> &[(String, Value)] {
        &self.terms
    }

    /// Returns the column names referenced by the predicate.
    pub fn column_names(&self) -> Vec<&str> {
        self.terms.iter().map(|(c, _)| c.as_str()).collect()
    }

    /// Returns true if the predicate is backed by a primary or unique key.
    pub fn is_unique_key(&self) -> bool {
        !matches!(self.source, KeySource::WholeRow)
    }

    /// Renders the predicate for a `WHERE` clause.
    pub fn render(&self, dialect: &Dialect) -> String {
        self.terms
            .iter()
            .map(|(column, value)| {
                format!(
                    "{}={}",
                    dialect.quote_identifier(column),
                    dialect.literal(value)
                )
            })
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Dialect::plain()))
    }
}

/// Builds the identification predicate for `row` from its original values.
///
/// With `allow_whole_row` unset, rows without a usable primary or unique key
/// are reported as unidentifiable instead of falling back.
pub fn identify_row(
    structure: &TableStructure,
    data: &QueryData,
    row: usize,
    allow_whole_row: bool,
) -> Result<Predicate, RowError> {
    let original = data.row(row)?.original();

    if let Some(terms) = structure
        .primary_key()
        .and_then(|pk| key_terms(pk, structure, data, original))
    {
        return Ok(Predicate {
            source: KeySource::PrimaryKey,
            terms,
        });
    }

    for unique in structure.unique_indexes() {
        if let Some(terms) = key_terms(unique, structure, data, original) {
            return Ok(Predicate {
                source: KeySource::Unique(unique.raw_name().to_string()),
                terms,
            });
        }
    }

    let terms = if allow_whole_row {
        whole_row_terms(structure, data, original)
    } else {
        Vec::new()
    };
    if terms.is_empty() {
        return Err(RowError::UnidentifiableRow {
            table: structure.name().to_string(),
            row,
        });
    }
    Ok(Predicate {
        source: KeySource::WholeRow,
        terms,
    })
}

/// Terms for `index`, or None if any member is unresolvable, missing from the
/// result set, or NULL in this row.
fn key_terms(
    index: &Index,
    structure: &TableStructure,
    data: &QueryData,
    original: &[Value],
) -> Option<Vec<(String, Value)>> {
    let columns = index.resolve(structure)?;
    if columns.is_empty() {
        return None;
    }
    columns
        .into_iter()
        .map(|column| {
            let value = original.get(data.column_index(column.name())?)?;
            if value.is_null() {
                None
            } else {
                Some((column.name().to_string(), value.clone()))
            }
        })
        .collect()
}

fn whole_row_terms(
    structure: &TableStructure,
    data: &QueryData,
    original: &[Value],
) -> Vec<(String, Value)> {
    let mut terms: Vec<(String, Value)> = Vec::new();
    for (name, value) in data.columns().iter().zip(original) {
        if value.is_null() {
            continue;
        }
        match structure.column_by_name(name) {
            Some(column) if column.data_type().matches_exactly() => {}
            _ => continue,
        }
        // a column selected twice is matched once
        if terms.iter().any(|(c, _)| c == name) {
            continue;
        }
        terms.push((name.clone(), value.clone()));
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use resultedit_core::schema::TableBuilder;
    use resultedit_core::DataType;

    fn users() -> TableStructure {
        TableBuilder::new("users")
            .unwrap()
            .add_column("id", DataType::Integer)
            .unwrap()
            .add_column("email", DataType::Text)
            .unwrap()
            .add_column("name", DataType::Text)
            .unwrap()
            .add_primary_key(&["id"])
            .unwrap()
            .add_unique("uq_email", &["email"])
            .unwrap()
            .build()
            .unwrap()
    }

    fn data(rows: Vec<Vec<Value>>) -> QueryData {
        let mut data = QueryData::new("users", vec!["id".into(), "email".into(), "name".into()]);
        for r in rows {
            data.push_row(r).unwrap();
        }
        data
    }

    #[test]
    fn test_primary_key_preferred() {
        let table = users();
        let data = data(vec![vec![1.into(), "a@x.com".into(), "Ann".into()]]);
        let p = identify_row(&table, &data, 0, true).unwrap();
        assert_eq!(p.source(), &KeySource::PrimaryKey);
        assert_eq!(p.to_string(), "id=1");
        assert!(p.is_unique_key());
    }

    #[test]
    fn test_unique_when_primary_key_null() {
        let table = users();
        let data = data(vec![vec![Value::Null, "a@x.com".into(), "Ann".into()]]);
        let p = identify_row(&table, &data, 0, true).unwrap();
        assert_eq!(p.source(), &KeySource::Unique("uq_email".into()));
        assert_eq!(p.to_string(), "email='a@x.com'");
    }

    #[test]
    fn test_whole_row_skips_nulls() {
        let table = users();
        let data = data(vec![vec![Value::Null, Value::Null, "Ann".into()]]);
        let p = identify_row(&table, &data, 0, true).unwrap();
        assert_eq!(p.source(), &KeySource::WholeRow);
        assert_eq!(p.column_names(), vec!["name"]);
    }

    #[test]
    fn test_whole_row_disabled() {
        let table = users();
        let data = data(vec![vec![Value::Null, Value::Null, "Ann".into()]]);
        assert_eq!(
            identify_row(&table, &data, 0, false),
            Err(RowError::UnidentifiableRow {
                table: "users".into(),
                row: 0
            })
        );
    }

    #[test]
    fn test_all_null_is_unidentifiable() {
        let table = users();
        let data = data(vec![vec![Value::Null, Value::Null, Value::Null]]);
        assert!(matches!(
            identify_row(&table, &data, 0, true),
            Err(RowError::UnidentifiableRow { row: 0, .. })
        ));
    }

    #[test]
    fn test_key_missing_from_result_set() {
        let table = users();
        let mut data = QueryData::new("users", vec!["email".into(), "name".into()]);
        data.push_row(vec!["a@x.com".into(), "Ann".into()]).unwrap();
        let p = identify_row(&table, &data, 0, true).unwrap();
        assert_eq!(p.source(), &KeySource::Unique("uq_email".into()));
    }

    #[test]
    fn test_uses_originals_not_edits() {
        let table = users();
        let mut data = data(vec![vec![1.into(), "a@x.com".into(), "Ann".into()]]);
        data.set_cell(0, 0, 99.into()).unwrap();
        let p = identify_row(&table, &data, 0, true).unwrap();
        assert_eq!(p.to_string(), "id=1");
    }

    #[test]
    fn test_whole_row_ignores_foreign_columns() {
        let table = users();
        let mut data = QueryData::new("users", vec!["name".into(), "name_len".into(), "name".into()]);
        data.push_row(vec!["Ann".into(), 3.into(), "Ann".into()]).unwrap();
        let p = identify_row(&table, &data, 0, true).unwrap();
        assert_eq!(p.terms(), &[("name".to_string(), Value::from("Ann"))]);
    }

    #[test]
    fn test_whole_row_skips_inexact_types() {
        let table = TableBuilder::new("readings")
            .unwrap()
            .add_column("sensor", DataType::Text)
            .unwrap()
            .add_column("reading", DataType::Float)
            .unwrap()
            .add_column("meta", DataType::Json)
            .unwrap()
            .build()
            .unwrap();
        let mut data = QueryData::new(
            "readings",
            vec!["sensor".into(), "reading".into(), "meta".into()],
        );
        data.push_row(vec!["s1".into(), 0.1.into(), "{}".into()])
            .unwrap();
        data.push_row(vec![Value::Null, 0.1.into(), "{}".into()])
            .unwrap();

        let p = identify_row(&table, &data, 0, true).unwrap();
        assert_eq!(p.to_string(), "sensor='s1'");
        assert!(matches!(
            identify_row(&table, &data, 1, true),
            Err(RowError::UnidentifiableRow { row: 1, .. })
        ));
    }

    #[test]
    fn test_render_with_dialect() {
        let table = users();
        let data = data(vec![vec![Value::Null, "o'x@x.com".into(), "Ann".into()]]);
        let p = identify_row(&table, &data, 0, true).unwrap();
        assert_eq!(p.render(&Dialect::mysql()), "`email`='o''x@x.com'");
    }

    #[test]
    fn test_row_out_of_range() {
        let table = users();
        let data = data(vec![]);
        assert!(matches!(
            identify_row(&table, &data, 0, true),
            Err(RowError::Metadata(_))
        ));
    }
}
