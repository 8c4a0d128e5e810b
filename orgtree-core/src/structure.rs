//! Manager → direct-reports grouping of a flat roster.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{field, instrument, Span};

use crate::{
    name::NormalizedName,
    record::EmployeeRecord,
    roster::{MatchCacheConfig, Resolution, ResolvedManager, RosterIndex},
};

/// A resolved manager and the employees who name them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ManagerEntry {
    key: NormalizedName,
    manager: EmployeeRecord,
    reports: Vec<EmployeeRecord>,
    resolution: Resolution,
}

impl ManagerEntry {
    /// Lookup key of the manager's name.
    #[must_use]
    pub const fn key(&self) -> &NormalizedName {
        &self.key
    }

    /// The roster row, or placeholder, standing for the manager.
    #[must_use]
    pub const fn manager(&self) -> &EmployeeRecord {
        &self.manager
    }

    /// Direct reports in input order.
    #[must_use]
    pub fn reports(&self) -> &[EmployeeRecord] {
        &self.reports
    }

    /// Number of direct reports.
    #[must_use]
    pub fn report_count(&self) -> usize {
        self.reports.len()
    }

    /// How the first reference to this manager was resolved.
    #[must_use]
    pub const fn resolution(&self) -> Resolution {
        self.resolution
    }
}

/// Every manager entry of a roster, keyed by normalized manager name.
///
/// Entries iterate in the order their manager was first referenced. The
/// structure is rebuilt from scratch for each roster and never edited.
///
/// # Examples
/// ```
/// use orgtree_core::{EmployeeRecord, ManagerStructure};
///
/// let roster = vec![
///     EmployeeRecord::new("Alice"),
///     EmployeeRecord::new("Bob").with_reporting_manager("Alice"),
///     EmployeeRecord::new("Carol").with_reporting_manager("alice "),
/// ];
/// let structure = ManagerStructure::build(&roster);
/// assert_eq!(structure.len(), 1);
/// let alice = structure.find("Alice").expect("alice manages");
/// assert_eq!(alice.report_count(), 2);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ManagerStructure {
    entries: Vec<ManagerEntry>,
    index: HashMap<NormalizedName, usize>,
}

impl ManagerStructure {
    /// Builds the structure with the default fuzzy-match cache.
    #[must_use]
    pub fn build(employees: &[EmployeeRecord]) -> Self {
        Self::build_with(employees, MatchCacheConfig::default())
    }

    /// Builds the structure, resolving every non-blank reporting manager
    /// exactly, then fuzzily, then by placeholder.
    #[must_use]
    #[instrument(
        name = "structure.build",
        skip(employees, config),
        fields(employees = employees.len(), managers = field::Empty, placeholders = field::Empty),
    )]
    pub fn build_with(employees: &[EmployeeRecord], config: MatchCacheConfig) -> Self {
        let mut roster = RosterIndex::with_cache_config(employees, config);
        let mut structure = Self::default();
        for employee in employees {
            let Some(manager_name) = employee.reporting_manager_name() else {
                continue;
            };
            if let Some(resolved) = roster.resolve(manager_name, &employee.department) {
                structure.push_report(resolved, employee.clone());
            }
        }
        let span = Span::current();
        span.record("managers", structure.len());
        span.record("placeholders", roster.placeholder_count());
        structure
    }

    fn push_report(&mut self, resolved: ResolvedManager, report: EmployeeRecord) {
        if let Some(entry) = self
            .index
            .get(&resolved.key)
            .and_then(|&pos| self.entries.get_mut(pos))
        {
            entry.reports.push(report);
            return;
        }
        self.index.insert(resolved.key.clone(), self.entries.len());
        self.entries.push(ManagerEntry {
            key: resolved.key,
            manager: resolved.record,
            reports: vec![report],
            resolution: resolved.resolution,
        });
    }

    /// Looks up an entry by normalized manager name.
    #[must_use]
    pub fn get(&self, key: &NormalizedName) -> Option<&ManagerEntry> {
        self.index.get(key).and_then(|&pos| self.entries.get(pos))
    }

    /// Looks up an entry by raw manager name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ManagerEntry> {
        self.get(&NormalizedName::new(name))
    }

    /// Returns whether `key` manages anyone.
    #[must_use]
    pub fn contains(&self, key: &NormalizedName) -> bool {
        self.index.contains_key(key)
    }

    /// Entries in first-reference order.
    #[must_use]
    pub fn entries(&self) -> &[ManagerEntry] {
        &self.entries
    }

    /// Iterates over entries in first-reference order.
    pub fn iter(&self) -> std::slice::Iter<'_, ManagerEntry> {
        self.entries.iter()
    }

    /// Number of manager entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nobody names a reporting manager.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries whose manager is a synthesized placeholder.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.manager.is_placeholder())
            .count()
    }
}

impl<'a> IntoIterator for &'a ManagerStructure {
    type Item = &'a ManagerEntry;
    type IntoIter = std::slice::Iter<'a, ManagerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
