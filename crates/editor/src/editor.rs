//! Query data editor: writes snapshot changes back to the source table.
//!
//! Every row is its own unit of work. Rows are processed in snapshot order,
//! one statement each, and a statement counts as successful only when the
//! server reports exactly one affected row:
//!
//! | affected | UPDATE                       | DELETE                        |
//! |----------|------------------------------|-------------------------------|
//! | 1        | edits folded into originals  | row removed from snapshot     |
//! | 0        | `StaleRow`, edits kept       | `StaleRow`, row removed       |
//! | > 1      | `NonUniqueMatch`, edits kept | `NonUniqueMatch`, row kept    |
//!
//! Execution errors keep the row as it was and never stop the remaining rows.

use crate::config::EditorConfig;
use crate::error::RowError;
use crate::executor::SqlExecutor;
use crate::identify::identify_row;
use crate::logging::{debug, error, info, warn};
use crate::report::CommitReport;
use crate::snapshot::QueryData;
use crate::statement::Statement;
use resultedit_core::schema::TableStructure;
use resultedit_core::Value;

/// Commits the pending changes of a [`QueryData`] snapshot.
#[derive(Clone, Debug, Default)]
pub struct QueryDataEditor {
    config: EditorConfig,
}

/// Server-side result of one row statement.
enum Affected {
    One,
    None,
    Many(u64),
}

impl QueryDataEditor {
    /// Creates an editor with the given configuration.
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Checks that `data` was selected from the table `structure` describes.
    pub fn check_editable(
        &self,
        structure: &TableStructure,
        data: &QueryData,
    ) -> Result<(), RowError> {
        if data.table() != structure.name() {
            return Err(RowError::NotEditable {
                table: data.table().to_string(),
                row: None,
                message: format!("table structure describes {}", structure.name()),
            });
        }
        if !data
            .columns()
            .iter()
            .any(|c| structure.column_by_name(c).is_some())
        {
            return Err(RowError::NotEditable {
                table: data.table().to_string(),
                row: None,
                message: "no result column belongs to the table".to_string(),
            });
        }
        Ok(())
    }

    /// Writes every row with pending edits back to the server.
    pub fn apply_modifications_in_db<E>(
        &self,
        structure: &TableStructure,
        data: &mut QueryData,
        executor: &mut E,
    ) -> CommitReport
    where
        E: SqlExecutor + ?Sized,
    {
        self.apply_modifications_until(structure, data, executor, || true)
    }

    /// Like [`apply_modifications_in_db`](Self::apply_modifications_in_db), but
    /// asks `keep_going` before each row and stops when it returns false.
    ///
    /// Rows not reached stay pending and are listed as not attempted.
    pub fn apply_modifications_until<E, F>(
        &self,
        structure: &TableStructure,
        data: &mut QueryData,
        executor: &mut E,
        mut keep_going: F,
    ) -> CommitReport
    where
        E: SqlExecutor + ?Sized,
        F: FnMut() -> bool,
    {
        let mut report = CommitReport::default();
        let pending = data.pending_rows();
        if pending.is_empty() {
            return report;
        }
        if let Err(err) = self.check_editable(structure, data) {
            warn!(table = data.table(), error = %err, "result set is not editable");
            report.failures.push(err);
            report.not_attempted = pending;
            return report;
        }

        for (i, &row) in pending.iter().enumerate() {
            if !keep_going() {
                report.cancelled = true;
                report.not_attempted.extend_from_slice(&pending[i..]);
                break;
            }
            match self.update_row(structure, data, executor, row) {
                Ok(()) => report.committed.push(row),
                Err(err) => report.failures.push(err),
            }
        }

        info!(
            table = structure.name(),
            committed = report.committed.len(),
            failed = report.failures.len(),
            not_attempted = report.not_attempted.len(),
            "commit finished"
        );
        report
    }

    fn update_row<E>(
        &self,
        structure: &TableStructure,
        data: &mut QueryData,
        executor: &mut E,
        row: usize,
    ) -> Result<(), RowError>
    where
        E: SqlExecutor + ?Sized,
    {
        let predicate = identify_row(
            structure,
            data,
            row,
            self.config.allows_whole_row_fallback(),
        )?;

        let entry = data.row(row)?;
        let mut assignments: Vec<(String, Value)> = Vec::new();
        for column in entry.edited_columns() {
            let name = &data.columns()[column];
            if structure.column_by_name(name).is_none() {
                return Err(RowError::NotEditable {
                    table: structure.name().to_string(),
                    row: Some(row),
                    message: format!("column {} does not belong to the table", name),
                });
            }
            let value = match entry.edit(column) {
                Some(value) => value,
                None => continue,
            };
            // a column selected twice gets one assignment
            match assignments.iter().find(|(assigned, _)| assigned == name) {
                Some((_, earlier)) if earlier == value => {}
                Some(_) => {
                    return Err(RowError::NotEditable {
                        table: structure.name().to_string(),
                        row: Some(row),
                        message: format!("column {} is edited to two different values", name),
                    });
                }
                None => assignments.push((name.clone(), value.clone())),
            }
        }

        let statement = Statement::update(
            structure.name(),
            assignments,
            predicate,
            self.config.get_dialect(),
        );
        match self.run(executor, &statement, row)? {
            Affected::One => {
                data.accept_edits(row)?;
                Ok(())
            }
            Affected::None => Err(self.stale(&statement, row)),
            Affected::Many(affected) => Err(self.non_unique(&statement, row, affected)),
        }
    }

    /// Deletes the row under the grid cursor.
    ///
    /// A row that is already gone on the server is reported as `StaleRow` and
    /// still removed from the snapshot. Once the row is removed the cursor is
    /// cleared, so calling this again reports `NoCurrentRow`.
    pub fn delete_current_row<E>(
        &self,
        structure: &TableStructure,
        data: &mut QueryData,
        executor: &mut E,
    ) -> Result<(), RowError>
    where
        E: SqlExecutor + ?Sized,
    {
        let row = data.current_row().ok_or_else(|| RowError::NoCurrentRow {
            table: data.table().to_string(),
        })?;
        self.check_editable(structure, data)?;
        self.delete_row(structure, data, executor, row)
    }

    /// Deletes every row marked for deletion, in snapshot order.
    ///
    /// Positions in the report refer to the snapshot as it was before the call.
    pub fn delete_marked_rows<E>(
        &self,
        structure: &TableStructure,
        data: &mut QueryData,
        executor: &mut E,
    ) -> CommitReport
    where
        E: SqlExecutor + ?Sized,
    {
        let mut report = CommitReport::default();
        let marked = data.marked_rows();
        if marked.is_empty() {
            return report;
        }
        if let Err(err) = self.check_editable(structure, data) {
            report.failures.push(err);
            report.not_attempted = marked;
            return report;
        }

        let mut removed = 0;
        for row in marked {
            let position = row - removed;
            let before = data.row_count();
            let result = self.delete_row(structure, data, executor, position);
            if data.row_count() < before {
                removed += 1;
            }
            match result {
                Ok(()) => report.committed.push(row),
                Err(err) => report.failures.push(relocate(err, row)),
            }
        }

        info!(
            table = structure.name(),
            deleted = report.committed.len(),
            failed = report.failures.len(),
            "batch delete finished"
        );
        report
    }

    fn delete_row<E>(
        &self,
        structure: &TableStructure,
        data: &mut QueryData,
        executor: &mut E,
        row: usize,
    ) -> Result<(), RowError>
    where
        E: SqlExecutor + ?Sized,
    {
        let predicate = identify_row(
            structure,
            data,
            row,
            self.config.allows_whole_row_fallback(),
        )?;
        let statement = Statement::delete(structure.name(), predicate, self.config.get_dialect());
        match self.run(executor, &statement, row)? {
            Affected::One => {
                data.remove_row(row)?;
                Ok(())
            }
            Affected::None => {
                data.remove_row(row)?;
                Err(self.stale(&statement, row))
            }
            Affected::Many(affected) => Err(self.non_unique(&statement, row, affected)),
        }
    }

    fn run<E>(&self, executor: &mut E, statement: &Statement, row: usize) -> Result<Affected, RowError>
    where
        E: SqlExecutor + ?Sized,
    {
        debug!(
            table = statement.table(),
            row,
            unique_key = statement.predicate().is_unique_key(),
            sql = statement.sql(),
            "executing row statement"
        );
        match executor.execute(statement) {
            Ok(1) => Ok(Affected::One),
            Ok(0) => Ok(Affected::None),
            Ok(n) => Ok(Affected::Many(n)),
            Err(err) => {
                warn!(table = statement.table(), row, error = %err, sql = statement.sql(), "statement failed");
                Err(RowError::ExecutionFailure {
                    table: statement.table().to_string(),
                    row,
                    statement: statement.sql().to_string(),
                    message: err.message().to_string(),
                })
            }
        }
    }

    fn stale(&self, statement: &Statement, row: usize) -> RowError {
        warn!(table = statement.table(), row, sql = statement.sql(), "no row matched");
        RowError::StaleRow {
            table: statement.table().to_string(),
            row,
            predicate: statement.predicate().render(self.config.get_dialect()),
            statement: statement.sql().to_string(),
        }
    }

    fn non_unique(&self, statement: &Statement, row: usize, affected: u64) -> RowError {
        error!(
            table = statement.table(),
            row,
            affected,
            sql = statement.sql(),
            "row statement matched more than one row"
        );
        RowError::NonUniqueMatch {
            table: statement.table().to_string(),
            row,
            predicate: statement.predicate().render(self.config.get_dialect()),
            statement: statement.sql().to_string(),
            affected,
        }
    }
}

/// Rewrites the row position of a batch-delete failure to the pre-batch position.
fn relocate(err: RowError, original: usize) -> RowError {
    match err {
        RowError::UnidentifiableRow { table, .. } => RowError::UnidentifiableRow {
            table,
            row: original,
        },
        RowError::StaleRow {
            table,
            predicate,
            statement,
            ..
        } => RowError::StaleRow {
            table,
            row: original,
            predicate,
            statement,
        },
        RowError::NonUniqueMatch {
            table,
            predicate,
            statement,
            affected,
            ..
        } => RowError::NonUniqueMatch {
            table,
            row: original,
            predicate,
            statement,
            affected,
        },
        RowError::ExecutionFailure {
            table,
            statement,
            message,
            ..
        } => RowError::ExecutionFailure {
            table,
            row: original,
            statement,
            message,
        },
        other => other,
    }
}
