use thiserror::Error;

/// Errors raised while loading a JSON roster.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum JsonRosterError {
    /// The document held no rows.
    #[error("roster contains no employee rows")]
    EmptyInput,
    /// The top-level value was neither an array nor an object.
    #[error("expected an array of objects or a single object but found {found}")]
    UnsupportedShape {
        /// JSON type that was found.
        found: &'static str,
    },
    /// An array element was not an object.
    #[error("row {row} is {found}, not an object")]
    NotAnObject {
        /// Zero-based index of the offending element.
        row: usize,
        /// JSON type that was found.
        found: &'static str,
    },
    /// The document was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The file could not be read.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
