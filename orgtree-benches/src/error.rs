//! Benchmark setup error type.
//!
//! Lets setup code propagate failures with `?` instead of `.expect()`.

use crate::source::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic roster generation failed.
    #[error("synthetic roster generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// A parameter that must be non-zero was zero.
    #[error("{context} must be greater than zero")]
    ZeroValue {
        /// Which parameter was zero.
        context: &'static str,
    },
    /// A record the benchmark relies on was not generated.
    #[error("synthetic roster has no {context}")]
    Missing {
        /// What was looked for.
        context: &'static str,
    },
}
