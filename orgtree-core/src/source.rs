//! Roster source abstraction implemented by ingestion providers.

use crate::record::EmployeeRecord;

/// Abstraction over an ingested collection of employee records.
///
/// # Examples
/// ```
/// use orgtree_core::{EmployeeRecord, OrgSession, RosterSource};
///
/// struct Fixed(Vec<EmployeeRecord>);
///
/// impl RosterSource for Fixed {
///     fn name(&self) -> &str { "fixed" }
///     fn records(&self) -> &[EmployeeRecord] { &self.0 }
/// }
///
/// let src = Fixed(vec![EmployeeRecord::new("Alice").with_department("Ops")]);
/// assert_eq!(src.len(), 1);
/// assert!(!src.is_empty());
///
/// let session = OrgSession::from_source(&src);
/// assert_eq!(session.departments(), ["Ops"]);
/// ```
pub trait RosterSource {
    /// Returns a human-readable name, usually the file it was read from.
    fn name(&self) -> &str;

    /// Returns the records in file order.
    fn records(&self) -> &[EmployeeRecord];

    /// Returns the number of records.
    #[must_use]
    fn len(&self) -> usize {
        self.records().len()
    }

    /// Returns whether the source holds no records.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RosterSource for Vec<EmployeeRecord> {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn records(&self) -> &[EmployeeRecord] {
        self
    }
}
