//! Shared test utilities for `orgtree-core`.

use proptest::{prelude::*, test_runner::Config as ProptestConfig};

use crate::record::EmployeeRecord;

/// Department used by the fixtures.
pub(crate) const DEPARTMENT: &str = "Engineering";

/// Builds a standard proptest configuration honouring `PROPTEST_CASES`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default_cases);
    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

/// Employee in [`DEPARTMENT`] with the given manager text.
#[must_use]
pub(crate) fn employee(name: &str, manager: &str) -> EmployeeRecord {
    EmployeeRecord::new(name)
        .with_department(DEPARTMENT)
        .with_reporting_manager(manager)
}

/// Employee with location and job profile set.
#[must_use]
pub(crate) fn staff(name: &str, manager: &str, location: &str, job: &str) -> EmployeeRecord {
    employee(name, manager)
        .with_location(location)
        .with_job_profile(job)
}

/// A small department exercising exact, case-variant and placeholder
/// resolution.
///
/// ```text
/// Alice (top level)
/// ├── Bob
/// │   └── Dave
/// ├── Carol
/// Erin -> "Frank Ghost" (placeholder)
/// Gina (top level)
/// ```
#[must_use]
pub(crate) fn sample_roster() -> Vec<EmployeeRecord> {
    vec![
        staff("Alice", "", "NY", "MGMT001-Director"),
        staff("Bob", "Alice", "NY", "ENGR001-Engineer"),
        staff("Carol", "alice ", "NY", "ENGR001-Engineer"),
        staff("Dave", "Bob", "London", "ENGR002-Engineer"),
        staff("Erin", "Frank Ghost", "London", "ENGR002-Engineer"),
        staff("Gina", "", "London", "HRBP001-Partner"),
    ]
}

/// Alphabetic, pairwise-dissimilar person name for index `i`.
///
/// Digits are stripped by normalization, so the index is spelled in letters.
#[must_use]
pub(crate) fn person_name(i: usize) -> String {
    let mut letters = String::new();
    let mut rest = i;
    loop {
        let digit = u8::try_from(rest % 26).unwrap_or(0);
        letters.push(char::from(b'a' + digit));
        rest /= 26;
        if rest == 0 {
            break;
        }
    }
    format!("Person Q{letters}")
}

const LOCATIONS: [&str; 4] = ["NY", "London", "Leeds", ""];
const JOBS: [&str; 4] = [
    "ENGR001-Engineer",
    "ENGR002-Engineer",
    "MGMT001-Director",
    "Intern",
];

fn build_roster(specs: &[(Option<usize>, usize, usize)], allow_forward: bool) -> Vec<EmployeeRecord> {
    let len = specs.len();
    specs
        .iter()
        .enumerate()
        .map(|(i, &(manager, location, job))| {
            let manager_name = manager
                .map(|m| if allow_forward { m % len } else { m % i.max(1) })
                .filter(|&m| allow_forward || m < i)
                .map(person_name)
                .unwrap_or_default();
            staff(
                &person_name(i),
                &manager_name,
                LOCATIONS.get(location % LOCATIONS.len()).copied().unwrap_or_default(),
                JOBS.get(job % JOBS.len()).copied().unwrap_or_default(),
            )
        })
        .collect()
}

fn roster_specs() -> impl Strategy<Value = Vec<(Option<usize>, usize, usize)>> {
    prop::collection::vec(
        (prop::option::weighted(0.8, 0..64_usize), 0..4_usize, 0..4_usize),
        0..40,
    )
}

/// Rosters whose managers always appear earlier, so no cycles exist.
pub(crate) fn acyclic_roster() -> impl Strategy<Value = Vec<EmployeeRecord>> {
    roster_specs().prop_map(|specs| build_roster(&specs, false))
}

/// Rosters whose managers may be anyone, including themselves.
pub(crate) fn cyclic_roster() -> impl Strategy<Value = Vec<EmployeeRecord>> {
    roster_specs().prop_map(|specs| build_roster(&specs, true))
}
