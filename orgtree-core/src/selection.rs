//! Department, manager and location filters applied before assembly.

use serde::{Deserialize, Serialize};

use crate::record::EmployeeRecord;

/// The active filters.
///
/// Department and location match by exact string equality. The manager
/// filter is resolved by normalized name against the filtered roster's
/// manager structure and selects chain assembly.
///
/// # Examples
/// ```
/// use orgtree_core::{EmployeeRecord, Selection};
///
/// let selection = Selection::new("Sales").with_location("Leeds").with_manager("  ");
/// assert_eq!(selection.manager(), None);
/// let leeds = EmployeeRecord::new("A").with_department("Sales").with_location("Leeds");
/// let york = EmployeeRecord::new("B").with_department("Sales").with_location("York");
/// assert!(selection.matches(&leeds));
/// assert!(!selection.matches(&york));
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Selection {
    department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

impl Selection {
    /// Selects a whole department.
    #[must_use]
    pub fn new(department: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            manager: None,
            location: None,
        }
    }

    /// Narrows to one manager's chain. Blank names clear the filter.
    #[must_use]
    pub fn with_manager(mut self, manager: impl Into<String>) -> Self {
        self.manager = non_blank(manager.into());
        self
    }

    /// Narrows to one location. Blank names clear the filter.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_blank(location.into());
        self
    }

    /// The department filter.
    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    /// The manager filter, if any.
    #[must_use]
    pub fn manager(&self) -> Option<&str> {
        self.manager.as_deref()
    }

    /// The location filter, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns whether `record` passes the department and location filters.
    #[must_use]
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        record.department == self.department
            && self
                .location
                .as_deref()
                .is_none_or(|location| record.location == location)
    }

    /// Clones the records passing the filters, preserving order.
    #[must_use]
    pub fn filter(&self, roster: &[EmployeeRecord]) -> Vec<EmployeeRecord> {
        roster
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}
