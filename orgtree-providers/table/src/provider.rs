//! Roster loading from delimited text tables.
use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use orgtree_core::{Column, EmployeeRecord, RosterSource};

use crate::errors::TableRosterError;

/// Cell separator of a table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Delimiter {
    /// Tab-separated values.
    #[default]
    Tab,
    /// Comma-separated values.
    Comma,
}

impl Delimiter {
    /// The separator byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Tab => b'\t',
            Self::Comma => b',',
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Tab => "\t",
            Self::Comma => ",",
        }
    }
}

/// Employee records parsed from a table with a header row.
#[derive(Clone, Debug)]
pub struct TableRoster {
    name: String,
    columns: Vec<Column>,
    records: Vec<EmployeeRecord>,
}

impl TableRoster {
    /// Parses a table held in memory.
    ///
    /// # Examples
    /// ```
    /// use orgtree_core::{Column, RosterSource};
    /// use orgtree_providers_table::{Delimiter, TableRoster};
    ///
    /// let text = "Full Name,Dept,Line Manager\nBob,X,\"Alice\"\n";
    /// let roster = TableRoster::try_from_str("export", text, Delimiter::Comma)?;
    /// assert_eq!(roster.columns(), [Column::EmployeeName, Column::Department, Column::ReportingManager]);
    /// assert_eq!(roster.records()[0].reporting_manager, "Alice");
    /// # Ok::<(), orgtree_providers_table::TableRosterError>(())
    /// ```
    ///
    /// # Errors
    /// See [`TableRoster::try_from_reader`].
    pub fn try_from_str(
        name: impl Into<String>,
        text: &str,
        delimiter: Delimiter,
    ) -> Result<Self, TableRosterError> {
        Self::try_from_reader(name, text.as_bytes(), delimiter)
    }

    /// Loads a table file, naming the roster after the file.
    ///
    /// # Errors
    /// Returns [`TableRosterError::Io`] when the file cannot be opened, plus
    /// every error of [`TableRoster::try_from_reader`].
    pub fn try_from_path(
        path: impl AsRef<Path>,
        delimiter: Delimiter,
    ) -> Result<Self, TableRosterError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self::try_from_reader(name, file, delimiter)
    }

    /// Parses a table from a reader.
    ///
    /// Fields follow the usual CSV quoting rules for either delimiter: a
    /// quoted field may hold the delimiter or a line break, and `""` inside
    /// quotes is a literal quote. Cells are trimmed. The first non-blank row
    /// is the header; later blank rows are skipped and short rows leave the
    /// missing columns empty. Header cells map onto columns through
    /// [`Column::from_header`]; unrecognised cells and repeats of an already
    /// claimed column are ignored.
    ///
    /// # Examples
    /// ```
    /// use orgtree_core::RosterSource;
    /// use orgtree_providers_table::{Delimiter, TableRoster};
    ///
    /// let text = "Employee Name,Department,Reporting Manager\n\"Doe, Jane\",X,\"Smith, John\"\n";
    /// let roster = TableRoster::try_from_reader("export", text.as_bytes(), Delimiter::Comma)?;
    /// assert_eq!(roster.records()[0].name, "Doe, Jane");
    /// assert_eq!(roster.records()[0].reporting_manager, "Smith, John");
    /// # Ok::<(), orgtree_providers_table::TableRosterError>(())
    /// ```
    ///
    /// # Errors
    /// Returns [`TableRosterError::Csv`] when reading or decoding fails,
    /// [`TableRosterError::NoKnownColumns`] when the header maps onto no
    /// column and [`TableRosterError::EmptyInput`] when there is no header or
    /// no data row.
    pub fn try_from_reader<R: Read>(
        name: impl Into<String>,
        reader: R,
        delimiter: Delimiter,
    ) -> Result<Self, TableRosterError> {
        let mut rows = ReaderBuilder::new()
            .delimiter(delimiter.as_byte())
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader)
            .into_records()
            .filter(|row| !matches!(row, Ok(record) if is_blank(record)));
        let header = rows.next().ok_or(TableRosterError::EmptyInput)??;
        let slots = header_slots(&header);
        if slots.iter().all(Option::is_none) {
            return Err(TableRosterError::NoKnownColumns {
                header: header.iter().collect::<Vec<_>>().join(delimiter.as_str()),
            });
        }

        let mut records = Vec::new();
        for row in rows {
            let row = row?;
            let mut record = EmployeeRecord::default();
            for (slot, cell) in slots.iter().zip(row.iter()) {
                if let Some(column) = *slot {
                    record.set(column, cell.to_owned());
                }
            }
            records.push(record);
        }
        if records.is_empty() {
            return Err(TableRosterError::EmptyInput);
        }
        Ok(Self {
            name: name.into(),
            columns: slots.into_iter().flatten().collect(),
            records,
        })
    }

    /// Columns recognised in the header, in header order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Consumes the roster, yielding its records.
    #[must_use]
    pub fn into_records(self) -> Vec<EmployeeRecord> {
        self.records
    }
}

impl RosterSource for TableRoster {
    fn name(&self) -> &str {
        &self.name
    }

    fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }
}

/// Column claimed by each header cell. The first cell to claim a column
/// keeps it.
fn header_slots(header: &StringRecord) -> Vec<Option<Column>> {
    let mut claimed = Vec::new();
    header
        .iter()
        .map(|cell| {
            let column = Column::from_header(cell)?;
            if claimed.contains(&column) {
                return None;
            }
            claimed.push(column);
            Some(column)
        })
        .collect()
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}
