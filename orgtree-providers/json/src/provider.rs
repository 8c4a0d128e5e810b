//! Roster loading from JSON documents.
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use orgtree_core::{Column, EmployeeRecord, RosterSource};
use serde_json::{Map, Value};

use crate::errors::JsonRosterError;

/// Employee records parsed from a JSON upload.
///
/// Keys are matched against each column's aliases in priority order, so
/// `"Employee Name"`, `"employeeName"`, `"name"` and `"fullName"` all fill
/// the name column.
#[derive(Clone, Debug)]
pub struct JsonRoster {
    name: String,
    records: Vec<EmployeeRecord>,
}

impl JsonRoster {
    /// Parses a JSON document held in memory.
    ///
    /// # Examples
    /// ```
    /// use orgtree_core::RosterSource;
    /// use orgtree_providers_json::JsonRoster;
    ///
    /// let roster = JsonRoster::try_from_str(
    ///     "upload",
    ///     r#"[{"name": "Bob", "dept": "X", "manager": "Alice", "id": 7}]"#,
    /// )?;
    /// let bob = &roster.records()[0];
    /// assert_eq!(bob.department, "X");
    /// assert_eq!(bob.reporting_manager, "Alice");
    /// assert_eq!(bob.employee_id, "7");
    /// assert_eq!(bob.location, "Unknown");
    /// # Ok::<(), orgtree_providers_json::JsonRosterError>(())
    /// ```
    ///
    /// # Errors
    /// Returns [`JsonRosterError::Json`] for malformed input and the shape
    /// errors described on [`JsonRoster::try_from_value`].
    pub fn try_from_str(name: impl Into<String>, text: &str) -> Result<Self, JsonRosterError> {
        let value: Value = serde_json::from_str(text)?;
        Self::try_from_value(name, value)
    }

    /// Parses a JSON document from a reader.
    ///
    /// # Errors
    /// Returns [`JsonRosterError::Json`] when reading or parsing fails and
    /// the shape errors described on [`JsonRoster::try_from_value`].
    pub fn try_from_reader<R: Read>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, JsonRosterError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::try_from_value(name, value)
    }

    /// Loads a JSON file, naming the roster after the file.
    ///
    /// # Errors
    /// Returns [`JsonRosterError::Io`] when the file cannot be opened, plus
    /// every error of [`JsonRoster::try_from_reader`].
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self, JsonRosterError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self::try_from_reader(name, BufReader::new(file))
    }

    /// Standardizes an already parsed document.
    ///
    /// # Errors
    /// Returns [`JsonRosterError::UnsupportedShape`] unless `value` is an
    /// array or an object, [`JsonRosterError::NotAnObject`] for an array
    /// element that is not an object, and [`JsonRosterError::EmptyInput`]
    /// when no rows remain.
    pub fn try_from_value(name: impl Into<String>, value: Value) -> Result<Self, JsonRosterError> {
        let rows = match value {
            Value::Array(rows) => rows,
            Value::Object(row) => vec![Value::Object(row)],
            other => {
                return Err(JsonRosterError::UnsupportedShape {
                    found: type_name(&other),
                });
            }
        };
        if rows.is_empty() {
            return Err(JsonRosterError::EmptyInput);
        }
        let records = rows
            .iter()
            .enumerate()
            .map(|(row, value)| match value {
                Value::Object(fields) => Ok(standardize(fields)),
                other => Err(JsonRosterError::NotAnObject {
                    row,
                    found: type_name(other),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.into(),
            records,
        })
    }

    /// Consumes the roster, yielding its records.
    #[must_use]
    pub fn into_records(self) -> Vec<EmployeeRecord> {
        self.records
    }
}

impl RosterSource for JsonRoster {
    fn name(&self) -> &str {
        &self.name
    }

    fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }
}

fn standardize(fields: &Map<String, Value>) -> EmployeeRecord {
    let mut record = EmployeeRecord::default();
    for column in Column::ALL {
        let value = column
            .json_aliases()
            .iter()
            .find_map(|alias| fields.get(*alias).and_then(cell_text))
            .unwrap_or_else(|| column.json_default().to_owned());
        record.set(column, value);
    }
    record
}

/// Text of a present value. Null and empty strings count as absent.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Some(value.to_string())
        }
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
