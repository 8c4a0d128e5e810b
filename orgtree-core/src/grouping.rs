//! Stable grouping of employees by location and display job role.

use std::collections::HashMap;

use crate::record::EmployeeRecord;

/// Job profile assumed when a record has none.
pub const UNKNOWN_ROLE: &str = "Unknown Role";

/// Location assumed when a record has none.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Length of the code prefix carried by raw job profiles.
const ROLE_PREFIX_CHARS: usize = 7;

/// Derives the display job role from a raw job profile.
///
/// Profiles longer than seven characters lose their first seven characters
/// along with any separator dashes or spaces that follow; shorter ones are
/// used as-is. A blank profile becomes [`UNKNOWN_ROLE`] before the rule
/// applies, which displays as `"Role"`.
///
/// Because separators are dropped, a code written with or without a dash
/// before the title yields the same role: `"ABCDEFG-Ops"`, `"ABCDEFG Ops"`
/// and `"ABCDEFGOps"` all display, and group, as `"Ops"`.
///
/// # Examples
/// ```
/// use orgtree_core::display_job_role;
///
/// assert_eq!(display_job_role("ENGR001-Senior Engineer"), "Senior Engineer");
/// assert_eq!(display_job_role("ENGR001Senior Engineer"), "Senior Engineer");
/// assert_eq!(display_job_role("Analyst"), "Analyst");
/// assert_eq!(display_job_role(""), "Role");
/// ```
#[must_use]
pub fn display_job_role(job_profile: &str) -> String {
    let raw = if job_profile.trim().is_empty() {
        UNKNOWN_ROLE
    } else {
        job_profile
    };
    if raw.chars().count() > ROLE_PREFIX_CHARS {
        raw.chars()
            .skip(ROLE_PREFIX_CHARS)
            .skip_while(|&c| c == '-' || c.is_whitespace())
            .collect()
    } else {
        raw.to_owned()
    }
}

/// Location key used for grouping.
#[must_use]
pub fn location_key(record: &EmployeeRecord) -> String {
    if record.location.trim().is_empty() {
        UNKNOWN_LOCATION.to_owned()
    } else {
        record.location.clone()
    }
}

/// A keyed run of employees in first-seen order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Group<'a> {
    /// Grouping key.
    pub key: String,
    /// Members in input order.
    pub members: Vec<&'a EmployeeRecord>,
}

/// Groups employees by display job role; keys appear in first-seen order.
pub fn group_by_job_role<'a, I>(employees: I) -> Vec<Group<'a>>
where
    I: IntoIterator<Item = &'a EmployeeRecord>,
{
    group_by(employees, |record| display_job_role(&record.job_profile))
}

/// Groups employees by location; keys appear in first-seen order.
pub fn group_by_location<'a, I>(employees: I) -> Vec<Group<'a>>
where
    I: IntoIterator<Item = &'a EmployeeRecord>,
{
    group_by(employees, location_key)
}

fn group_by<'a, I, F>(employees: I, mut key_of: F) -> Vec<Group<'a>>
where
    I: IntoIterator<Item = &'a EmployeeRecord>,
    F: FnMut(&EmployeeRecord) -> String,
{
    let mut groups: Vec<Group<'a>> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for record in employees {
        let key = key_of(record);
        match positions.get(&key).and_then(|&pos| groups.get_mut(pos)) {
            Some(group) => group.members.push(record),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(Group {
                    key,
                    members: vec![record],
                });
            }
        }
    }
    groups
}
