//! Benchmark parameter types.

use std::fmt;

/// Parameters for one roster-shaped benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct RosterBenchParams {
    /// Employees in the roster.
    pub employees: usize,
    /// Average direct reports per manager.
    pub span: usize,
}

impl fmt::Display for RosterBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},span={}", self.employees, self.span)
    }
}
