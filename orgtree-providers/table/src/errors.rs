use thiserror::Error;

/// Errors raised while loading a delimited table.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TableRosterError {
    /// The input had no header or no data rows.
    #[error("roster contains no employee rows")]
    EmptyInput,
    /// No header cell mapped onto a known column.
    #[error("header `{header}` names no recognised column")]
    NoKnownColumns {
        /// The header cells, rejoined with the delimiter.
        header: String,
    },
    /// The input could not be read or was not valid delimited UTF-8 text.
    #[error("table error: {0}")]
    Csv(#[from] csv::Error),
    /// The file could not be opened.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
