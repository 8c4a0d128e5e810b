//! JSON roster provider: arrays of employee objects with loosely named keys.

mod errors;
mod provider;

pub use errors::JsonRosterError;
pub use provider::JsonRoster;
