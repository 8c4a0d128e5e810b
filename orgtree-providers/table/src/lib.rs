//! Delimited-table roster provider for tab- or comma-separated exports.

mod errors;
mod provider;

pub use errors::TableRosterError;
pub use provider::{Delimiter, TableRoster};
