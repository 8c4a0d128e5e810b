//! Benchmark support crate for orgtree.
//!
//! Provides a seeded synthetic roster generator and parameter types for the
//! Criterion benchmarks covering manager-structure building and both
//! hierarchy assembly modes.

pub mod error;
pub mod params;
pub mod source;
