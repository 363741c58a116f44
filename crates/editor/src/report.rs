//! Outcome of a commit or batch delete.

use crate::error::{RowError, Severity};

/// Per-row outcome of one commit or batch delete.
///
/// Rows are independent: a failure never undoes rows already committed, so a
/// report can mix committed rows and failures.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommitReport {
    /// Snapshot positions (at the start of the operation) that were written.
    pub(crate) committed: Vec<usize>,
    /// Rows that failed, in snapshot order.
    pub(crate) failures: Vec<RowError>,
    /// Rows left untouched because the operation stopped early.
    pub(crate) not_attempted: Vec<usize>,
    pub(crate) cancelled: bool,
}

impl CommitReport {
    /// Returns true if every pending row was written.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.not_attempted.is_empty()
    }

    /// Returns the rows that were written.
    #[inline]
    pub fn committed(&self) -> &[usize] {
        &self.committed
    }

    /// Returns the failures.
    #[inline]
    pub fn failures(&self) -> &[RowError] {
        &self.failures
    }

    /// Returns the rows that were never attempted.
    #[inline]
    pub fn not_attempted(&self) -> &[usize] {
        &self.not_attempted
    }

    /// Returns true if the operation was cancelled at a row boundary.
    #[inline]
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Returns true if some statement matched more than one row.
    pub fn has_integrity_incident(&self) -> bool {
        self.failures
            .iter()
            .any(|f| f.severity() == Severity::Integrity)
    }

    /// Returns the highest failure severity, if any row failed.
    pub fn worst_severity(&self) -> Option<Severity> {
        self.failures.iter().map(RowError::severity).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_success() {
        let report = CommitReport::default();
        assert!(report.is_success());
        assert_eq!(report.worst_severity(), None);
    }

    #[test]
    fn test_not_attempted_is_failure() {
        let report = CommitReport {
            committed: vec![0],
            not_attempted: vec![1],
            cancelled: true,
            ..Default::default()
        };
        assert!(!report.is_success());
        assert!(report.was_cancelled());
        assert!(!report.has_integrity_incident());
    }

    #[test]
    fn test_integrity_incident() {
        let report = CommitReport {
            failures: vec![
                RowError::UnidentifiableRow {
                    table: "t".into(),
                    row: 0,
                },
                RowError::NonUniqueMatch {
                    table: "t".into(),
                    row: 1,
                    predicate: "a=1".into(),
                    statement: "DELETE FROM t WHERE a=1".into(),
                    affected: 3,
                },
            ],
            ..Default::default()
        };
        assert!(report.has_integrity_incident());
        assert_eq!(report.worst_severity(), Some(Severity::Integrity));
    }
}
