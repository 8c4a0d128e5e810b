use orgtree_core::{EmployeeRecord, RosterSource};

/// Fixed roster used by the integration suites.
pub struct StaticRoster {
    records: Vec<EmployeeRecord>,
}

impl StaticRoster {
    #[must_use]
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self { records }
    }
}

impl RosterSource for StaticRoster {
    fn name(&self) -> &str {
        "static"
    }

    fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }
}

#[must_use]
pub fn person(name: &str, manager: &str, department: &str) -> EmployeeRecord {
    EmployeeRecord::new(name)
        .with_department(department)
        .with_reporting_manager(manager)
        .with_location("NY")
        .with_job_profile("Eng")
}

/// Two departments: a three-level engineering chain and a flat sales team.
#[must_use]
pub fn company() -> StaticRoster {
    StaticRoster::new(vec![
        person("Alice", "", "X"),
        person("Bob", "Alice", "X"),
        person("Carol", "alice ", "X"),
        person("Dan", "Bob", "X"),
        person("Eve", "Frank Ghost", "X"),
        person("Sam", "", "Sales"),
        person("Tia", "Sam", "Sales"),
    ])
}
