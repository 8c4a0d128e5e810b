//! Summary counts shown alongside a generated hierarchy.

use std::collections::HashSet;

use serde::Serialize;

use crate::{name::NormalizedName, record::EmployeeRecord, structure::ManagerStructure};

/// Headline numbers for one generation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Employees in the filtered roster.
    pub total_employees: usize,
    /// Manager entries in the structure.
    pub manager_count: usize,
    /// Direct reports of the selected manager.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_reports: Option<usize>,
    /// Reporting hops above the selected manager.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels_above: Option<usize>,
}

impl SummaryStats {
    /// Computes the counts for `employees`, optionally focused on `manager`.
    ///
    /// Levels above are counted by following each reporting manager's entry
    /// in `structure`. A hop to a name without an entry still counts and
    /// ends the walk; a repeated name ends it without counting.
    ///
    /// # Examples
    /// ```
    /// use orgtree_core::{EmployeeRecord, ManagerStructure, SummaryStats};
    ///
    /// let roster = vec![
    ///     EmployeeRecord::new("Ann").with_reporting_manager("Board"),
    ///     EmployeeRecord::new("Ben").with_reporting_manager("Ann"),
    ///     EmployeeRecord::new("Cat").with_reporting_manager("Ben"),
    /// ];
    /// let structure = ManagerStructure::build(&roster);
    /// let stats = SummaryStats::compute(&roster, &structure, Some("Ben"));
    /// assert_eq!(stats.manager_count, 3);
    /// assert_eq!(stats.direct_reports, Some(1));
    /// assert_eq!(stats.levels_above, Some(2));
    /// ```
    #[must_use]
    pub fn compute(
        employees: &[EmployeeRecord],
        structure: &ManagerStructure,
        manager: Option<&str>,
    ) -> Self {
        let focus = manager.and_then(|name| structure.find(name));
        Self {
            total_employees: employees.len(),
            manager_count: structure.len(),
            direct_reports: focus.map(|entry| entry.report_count()),
            levels_above: focus.map(|entry| levels_above(structure, entry.manager())),
        }
    }
}

fn levels_above(structure: &ManagerStructure, manager: &EmployeeRecord) -> usize {
    let mut seen = HashSet::from([manager.normalized_name()]);
    let mut levels = 0_usize;
    let mut current = manager;
    while let Some(name) = current.reporting_manager_name() {
        let key = NormalizedName::new(name);
        if !seen.insert(key.clone()) {
            break;
        }
        levels = levels.saturating_add(1);
        match structure.get(&key) {
            Some(entry) => current = entry.manager(),
            None => break,
        }
    }
    levels
}
