//! Shared test utilities used across orgtree crates.

pub mod tracing;
