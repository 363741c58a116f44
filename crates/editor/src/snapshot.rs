//! Query data snapshot: fetched rows plus pending, uncommitted changes.
//!
//! Each [`SnapshotRow`] keeps the values last read from the server
//! ("originals") separately from the user's overlay of cell edits. Originals
//! only change through [`QueryData::accept_edits`], after the server has
//! confirmed the update, so row identification always sees what the server
//! still holds.

use hashbrown::HashMap;
use resultedit_core::{Error, Result, Value};

/// Edit state of a snapshot row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowState {
    /// No pending changes.
    Unmodified,
    /// At least one cell edit is pending.
    Edited,
    /// The row is marked for deletion.
    MarkedForDeletion,
}

/// One fetched row and its pending changes.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotRow {
    /// Values as last read from the server, by result column.
    original: Vec<Value>,
    /// Pending cell edits (result column → new value).
    edits: HashMap<usize, Value>,
    /// Whether the row is marked for deletion.
    marked_for_deletion: bool,
}

impl SnapshotRow {
    /// Creates an unmodified row.
    pub fn new(original: Vec<Value>) -> Self {
        Self {
            original,
            edits: HashMap::new(),
            marked_for_deletion: false,
        }
    }

    /// Returns the edit state.
    pub fn state(&self) -> RowState {
        if self.marked_for_deletion {
            RowState::MarkedForDeletion
        } else if self.edits.is_empty() {
            RowState::Unmodified
        } else {
            RowState::Edited
        }
    }

    /// Returns the original values.
    #[inline]
    pub fn original(&self) -> &[Value] {
        &self.original
    }

    /// Returns the current value of a cell: the pending edit if any, else the original.
    pub fn value(&self, column: usize) -> Option<&Value> {
        self.edits.get(&column).or_else(|| self.original.get(column))
    }

    /// Returns the pending edit of a cell, if any.
    pub fn edit(&self, column: usize) -> Option<&Value> {
        self.edits.get(&column)
    }

    /// Returns the edited result columns in ascending order.
    pub fn edited_columns(&self) -> Vec<usize> {
        let mut columns: Vec<usize> = self.edits.keys().copied().collect();
        columns.sort_unstable();
        columns
    }

    /// Returns true if the row is marked for deletion.
    #[inline]
    pub fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }
}

/// The rows of one result set, bound to the table they were selected from.
#[derive(Clone, Debug)]
pub struct QueryData {
    /// Source table name.
    table: String,
    /// Result column names, in result order.
    columns: Vec<String>,
    rows: Vec<SnapshotRow>,
    /// Row the grid cursor is on.
    current_row: Option<usize>,
}

impl QueryData {
    /// Creates an empty snapshot for a result set selected from `table`.
    pub fn new(table: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            table: table.into(),
            columns,
            rows: Vec::new(),
            current_row: None,
        }
    }

    /// Appends a fetched row and returns its position.
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<usize> {
        if values.len() != self.columns.len() {
            return Err(Error::invalid_operation(format!(
                "row has {} values, result set has {} columns",
                values.len(),
                self.columns.len()
            )));
        }
        self.rows.push(SnapshotRow::new(values));
        Ok(self.rows.len() - 1)
    }

    /// Returns the source table name.
    #[inline]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the result column names.
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the position of the first result column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns all rows.
    #[inline]
    pub fn rows(&self) -> &[SnapshotRow] {
        &self.rows
    }

    /// Returns a row.
    pub fn row(&self, row: usize) -> Result<&SnapshotRow> {
        let len = self.rows.len();
        self.rows.get(row).ok_or(Error::row_out_of_range(row, len))
    }

    fn row_mut(&mut self, row: usize) -> Result<&mut SnapshotRow> {
        let len = self.rows.len();
        self.rows.get_mut(row).ok_or(Error::row_out_of_range(row, len))
    }

    fn check_column(&self, column: usize) -> Result<()> {
        if column < self.columns.len() {
            Ok(())
        } else {
            Err(Error::cell_out_of_range(column, self.columns.len()))
        }
    }

    /// Returns the state of a row.
    pub fn row_state(&self, row: usize) -> Result<RowState> {
        Ok(self.row(row)?.state())
    }

    /// Returns the current value of a cell.
    pub fn value(&self, row: usize, column: usize) -> Result<&Value> {
        self.check_column(column)?;
        self.row(row)?
            .value(column)
            .ok_or(Error::cell_out_of_range(column, self.columns.len()))
    }

    /// Returns the original value of a cell.
    pub fn original(&self, row: usize, column: usize) -> Result<&Value> {
        self.check_column(column)?;
        self.row(row)?
            .original
            .get(column)
            .ok_or(Error::cell_out_of_range(column, self.columns.len()))
    }

    /// Returns the row the grid cursor is on.
    #[inline]
    pub fn current_row(&self) -> Option<usize> {
        self.current_row
    }

    /// Moves the grid cursor.
    pub fn set_current_row(&mut self, row: Option<usize>) -> Result<()> {
        if let Some(r) = row {
            self.row(r)?;
        }
        self.current_row = row;
        Ok(())
    }

    /// Records an edit of one cell.
    ///
    /// Setting a cell back to its original value drops that cell's edit.
    /// Rows marked for deletion cannot be edited.
    pub fn set_cell(&mut self, row: usize, column: usize, value: Value) -> Result<()> {
        self.check_column(column)?;
        let entry = self.row_mut(row)?;
        if entry.marked_for_deletion {
            return Err(Error::invalid_operation(format!(
                "row {} is marked for deletion",
                row
            )));
        }
        if entry.original[column] == value {
            entry.edits.remove(&column);
        } else {
            entry.edits.insert(column, value);
        }
        Ok(())
    }

    /// Marks a row for deletion, discarding its pending edits.
    pub fn mark_for_deletion(&mut self, row: usize) -> Result<()> {
        let entry = self.row_mut(row)?;
        entry.edits.clear();
        entry.marked_for_deletion = true;
        Ok(())
    }

    /// Drops all pending changes of a row; it returns to Unmodified.
    pub fn discard_changes(&mut self, row: usize) -> Result<()> {
        let entry = self.row_mut(row)?;
        entry.edits.clear();
        entry.marked_for_deletion = false;
        Ok(())
    }

    /// Drops all pending changes of every row.
    pub fn discard_all(&mut self) {
        for entry in &mut self.rows {
            entry.edits.clear();
            entry.marked_for_deletion = false;
        }
    }

    /// Folds a row's edits into its originals after the server accepted them.
    ///
    /// Every result column with the same name as an edited one takes the new
    /// value, since they all read the same server column.
    pub fn accept_edits(&mut self, row: usize) -> Result<()> {
        let len = self.rows.len();
        let columns = &self.columns;
        let entry = self
            .rows
            .get_mut(row)
            .ok_or(Error::row_out_of_range(row, len))?;
        for (column, value) in entry.edits.drain() {
            for (i, name) in columns.iter().enumerate() {
                if *name == columns[column] {
                    entry.original[i] = value.clone();
                }
            }
        }
        Ok(())
    }

    /// Removes a row after the server deleted it.
    ///
    /// A cursor below the row follows it down. A cursor on the removed row is
    /// cleared rather than moved, so a repeated delete cannot reach a neighbour.
    pub fn remove_row(&mut self, row: usize) -> Result<SnapshotRow> {
        self.row(row)?;
        let removed = self.rows.remove(row);
        self.current_row = match self.current_row {
            Some(cur) if cur > row => Some(cur - 1),
            Some(cur) if cur == row => None,
            other => other,
        };
        Ok(removed)
    }

    /// Returns the positions of rows with pending edits, in snapshot order.
    pub fn pending_rows(&self) -> Vec<usize> {
        self.positions_in(RowState::Edited)
    }

    /// Returns the positions of rows marked for deletion, in snapshot order.
    pub fn marked_rows(&self) -> Vec<usize> {
        self.positions_in(RowState::MarkedForDeletion)
    }

    fn positions_in(&self, state: RowState) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.state() == state)
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns true if any row has pending edits or a deletion mark.
    pub fn has_pending_changes(&self) -> bool {
        self.rows.iter().any(|r| r.state() != RowState::Unmodified)
    }
}
