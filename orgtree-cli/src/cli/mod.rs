//! Command-line interface orchestration for org-hierarchy reports.
//!
//! `generate` loads a roster through a provider, applies the selection
//! filters and renders the assembled hierarchy as text or JSON. `inspect`
//! lists what a roster offers for selection.

mod commands;
mod render;

pub use commands::{
    Cli, CliError, Command, CommandOutput, DelimiterArg, DepartmentSummary, GenerateCommand,
    GenerationReport, InputSource, InspectCommand, InspectionReport, JsonArgs, OutputFormat,
    TableArgs, run_cli,
};
pub use render::render_output;

#[cfg(test)]
mod tests;
