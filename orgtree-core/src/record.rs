//! Flat employee rows and the standardized column vocabulary.
//!
//! An [`EmployeeRecord`] is what every ingestion provider produces. Its serde
//! representation uses the standardized column headers so persisted rosters
//! round-trip through the same names the upload heuristics target.

use serde::{Deserialize, Serialize};

use crate::name::NormalizedName;

/// Job profile assigned to managers synthesized for unresolvable names.
pub const PLACEHOLDER_JOB_PROFILE: &str = "Manager (Details not found)";

/// Location assigned to synthesized managers.
pub const PLACEHOLDER_LOCATION: &str = "N/A";

/// One flat input row.
///
/// Records are treated as immutable once ingested. Nothing enforces that a
/// name appears only once; duplicates collide on their [`NormalizedName`].
///
/// # Examples
/// ```
/// use orgtree_core::EmployeeRecord;
///
/// let bob = EmployeeRecord::new("Bob")
///     .with_department("X")
///     .with_reporting_manager("Alice");
/// assert_eq!(bob.reporting_manager_name(), Some("Alice"));
/// assert_eq!(bob.normalized_name().as_str(), "bob");
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct EmployeeRecord {
    /// Owning department.
    #[serde(rename = "Department", default)]
    pub department: String,
    /// Display name.
    #[serde(rename = "Employee Name", default)]
    pub name: String,
    /// Raw job profile, possibly carrying a seven-character code prefix.
    #[serde(rename = "Job Profile", default)]
    pub job_profile: String,
    /// Office location.
    #[serde(rename = "Location", default)]
    pub location: String,
    /// Free-text name of the person this employee reports to.
    #[serde(rename = "Reporting Manager", default)]
    pub reporting_manager: String,
    /// Identifier from the source system.
    #[serde(rename = "Employee ID", default)]
    pub employee_id: String,
    /// Contact email.
    #[serde(rename = "Email", default)]
    pub email: String,
    /// Contact phone number.
    #[serde(rename = "Phone", default)]
    pub phone: String,
}

impl EmployeeRecord {
    /// Creates a record with the given name and every other column empty.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Synthesizes the stand-in record for a manager name that matched no
    /// roster row. The department is inherited from the reporting employee.
    #[must_use]
    pub fn placeholder(name: &str, department: &str) -> Self {
        Self {
            department: department.to_owned(),
            name: name.trim().to_owned(),
            job_profile: PLACEHOLDER_JOB_PROFILE.to_owned(),
            location: PLACEHOLDER_LOCATION.to_owned(),
            ..Self::default()
        }
    }

    /// Sets the department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the raw job profile.
    #[must_use]
    pub fn with_job_profile(mut self, job_profile: impl Into<String>) -> Self {
        self.job_profile = job_profile.into();
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the reporting manager text.
    #[must_use]
    pub fn with_reporting_manager(mut self, manager: impl Into<String>) -> Self {
        self.reporting_manager = manager.into();
        self
    }

    /// Sets the employee identifier.
    #[must_use]
    pub fn with_employee_id(mut self, id: impl Into<String>) -> Self {
        self.employee_id = id.into();
        self
    }

    /// Returns the trimmed reporting manager name, or `None` when blank.
    #[must_use]
    pub fn reporting_manager_name(&self) -> Option<&str> {
        let trimmed = self.reporting_manager.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Returns whether this employee names a reporting manager.
    #[must_use]
    pub fn has_reporting_manager(&self) -> bool {
        self.reporting_manager_name().is_some()
    }

    /// Returns whether this record was synthesized for an unresolved manager.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.job_profile == PLACEHOLDER_JOB_PROFILE
    }

    /// Returns the lookup key for this record's name.
    #[must_use]
    pub fn normalized_name(&self) -> NormalizedName {
        NormalizedName::new(&self.name)
    }

    /// Name used on person nodes; blank names render as `Unknown`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Unknown"
        } else {
            &self.name
        }
    }

    /// Label used on person nodes: `"<name> - <job profile>"`.
    #[must_use]
    pub fn person_label(&self) -> String {
        format!("{} - {}", self.display_name(), self.job_profile)
    }

    /// Reads one standardized column.
    #[must_use]
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::Department => &self.department,
            Column::EmployeeName => &self.name,
            Column::JobProfile => &self.job_profile,
            Column::Location => &self.location,
            Column::ReportingManager => &self.reporting_manager,
            Column::EmployeeId => &self.employee_id,
            Column::Email => &self.email,
            Column::Phone => &self.phone,
        }
    }

    /// Overwrites one standardized column.
    pub fn set(&mut self, column: Column, value: String) {
        let slot = match column {
            Column::Department => &mut self.department,
            Column::EmployeeName => &mut self.name,
            Column::JobProfile => &mut self.job_profile,
            Column::Location => &mut self.location,
            Column::ReportingManager => &mut self.reporting_manager,
            Column::EmployeeId => &mut self.employee_id,
            Column::Email => &mut self.email,
            Column::Phone => &mut self.phone,
        };
        *slot = value;
    }
}

/// The standardized columns every provider maps its input onto.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Column {
    /// Owning department.
    Department,
    /// Display name.
    EmployeeName,
    /// Raw job profile.
    JobProfile,
    /// Office location.
    Location,
    /// Reporting manager text.
    ReportingManager,
    /// Source-system identifier.
    EmployeeId,
    /// Contact email.
    Email,
    /// Contact phone.
    Phone,
}

impl Column {
    /// Every column in canonical order.
    pub const ALL: [Self; 8] = [
        Self::Department,
        Self::EmployeeName,
        Self::JobProfile,
        Self::Location,
        Self::ReportingManager,
        Self::EmployeeId,
        Self::Email,
        Self::Phone,
    ];

    /// Returns the standardized header text.
    #[must_use]
    pub const fn canonical_name(self) -> &'static str {
        match self {
            Self::Department => "Department",
            Self::EmployeeName => "Employee Name",
            Self::JobProfile => "Job Profile",
            Self::Location => "Location",
            Self::ReportingManager => "Reporting Manager",
            Self::EmployeeId => "Employee ID",
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }

    /// Object keys accepted for this column in JSON uploads, in priority order.
    #[must_use]
    pub const fn json_aliases(self) -> &'static [&'static str] {
        match self {
            Self::Department => &["Department", "department", "Dept", "dept"],
            Self::EmployeeName => &["Employee Name", "employeeName", "name", "fullName"],
            Self::JobProfile => &["Job Profile", "jobProfile", "title", "position"],
            Self::Location => &["Location", "location", "office"],
            Self::ReportingManager => &[
                "Reporting Manager",
                "reportingManager",
                "manager",
                "supervisor",
            ],
            Self::EmployeeId => &["Employee ID", "employeeID", "staffID", "id"],
            Self::Email => &["Email", "email", "mail"],
            Self::Phone => &["Phone", "phone", "mobile", "contact"],
        }
    }

    /// Value used when a JSON upload omits the column.
    #[must_use]
    pub const fn json_default(self) -> &'static str {
        match self {
            Self::Department | Self::EmployeeName | Self::JobProfile | Self::Location => {
                "Unknown"
            }
            Self::ReportingManager | Self::EmployeeId | Self::Email | Self::Phone => "",
        }
    }

    /// Maps a free-form table header onto a column.
    ///
    /// Rules are checked in order and the first match wins, so a header such
    /// as `"Reporting Manager Email"` maps to [`Column::ReportingManager`].
    ///
    /// # Examples
    /// ```
    /// use orgtree_core::Column;
    ///
    /// assert_eq!(Column::from_header(" Job Title "), Some(Column::JobProfile));
    /// assert_eq!(Column::from_header("Staff ID"), Some(Column::EmployeeId));
    /// assert_eq!(Column::from_header("Favourite colour"), None);
    /// ```
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        let h = header.trim().to_lowercase();
        let has = |needle: &str| h.contains(needle);
        if has("department") || h == "dept" {
            Some(Self::Department)
        } else if (has("employee") && has("name")) || h == "name" || h == "full name" {
            Some(Self::EmployeeName)
        } else if (has("job") && has("profile")) || has("title") || has("position") {
            Some(Self::JobProfile)
        } else if has("location") || h == "office" {
            Some(Self::Location)
        } else if has("manager") || has("supervisor") {
            Some(Self::ReportingManager)
        } else if (has("employee") && has("id")) || has("staff id") || has("emp id") {
            Some(Self::EmployeeId)
        } else if has("email") || has("mail") {
            Some(Self::Email)
        } else if has("phone") || has("mobile") || has("contact") {
            Some(Self::Phone)
        } else {
            None
        }
    }
}
