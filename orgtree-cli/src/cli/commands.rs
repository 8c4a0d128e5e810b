//! Command implementations and argument parsing for the orgtree CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use orgtree_core::{
    CanvasSize, EmployeeRecord, HierarchyGraph, HierarchyMetrics, ManagerChoice, OrgError,
    OrgSession, RosterSource, Selection, SummaryStats,
};
use orgtree_providers_json::{JsonRoster, JsonRosterError};
use orgtree_providers_table::{Delimiter, TableRoster, TableRosterError};
use thiserror::Error;
use tracing::{Span, debug, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "orgtree", about = "Reconstruct org hierarchies from employee rosters.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Assemble and print the hierarchy for a department or manager chain.
    Generate(GenerateCommand),
    /// List departments, locations and managers found in a roster.
    Inspect(InspectCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Department to assemble.
    #[arg(long)]
    pub department: String,

    /// Restrict the report to this manager's reporting chain.
    #[arg(long)]
    pub manager: Option<String>,

    /// Keep only employees at this location.
    #[arg(long)]
    pub location: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Roster input.
    #[command(subcommand)]
    pub source: InputSource,
}

/// Options accepted by the `inspect` command.
#[derive(Debug, Args, Clone)]
pub struct InspectCommand {
    /// Roster input.
    #[command(subcommand)]
    pub source: InputSource,
}

/// Roster inputs supported by the CLI. Several files of one kind are read
/// in order and their records concatenated into a single roster.
#[derive(Debug, Subcommand, Clone)]
pub enum InputSource {
    /// Read JSON arrays of employee objects.
    Json(JsonArgs),
    /// Read delimited tables with a header row.
    Table(TableArgs),
}

/// JSON ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct JsonArgs {
    /// Paths to the JSON files.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Table ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct TableArgs {
    /// Paths to the table files.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Cell separator.
    #[arg(long, value_enum, default_value_t = DelimiterArg::Tab)]
    pub delimiter: DelimiterArg,
}

/// Cell separators accepted on the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum DelimiterArg {
    /// Tab-separated values.
    Tab,
    /// Comma-separated values.
    Comma,
}

impl From<DelimiterArg> for Delimiter {
    fn from(arg: DelimiterArg) -> Self {
        match arg {
            DelimiterArg::Tab => Self::Tab,
            DelimiterArg::Comma => Self::Comma,
        }
    }
}

/// Report formats for `generate`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Summary lines followed by an indented tree.
    #[default]
    Text,
    /// A single JSON document with stats, metrics and the graph.
    Json,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// JSON ingestion failed.
    #[error(transparent)]
    Json(#[from] JsonRosterError),
    /// Table ingestion failed.
    #[error(transparent)]
    Table(#[from] TableRosterError),
    /// Hierarchy generation failed.
    #[error(transparent)]
    Core(#[from] OrgError),
}

/// Outcome of a `generate` run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Names of the roster files, comma separated.
    pub roster: String,
    /// Filters that produced the graph.
    pub selection: Selection,
    /// Headline counts.
    pub stats: SummaryStats,
    /// Depth and breadth.
    pub metrics: HierarchyMetrics,
    /// Canvas size under the default layout.
    pub canvas: CanvasSize,
    /// The assembled hierarchy.
    pub graph: HierarchyGraph,
    /// Requested output format.
    pub format: OutputFormat,
}

/// One department listed by `inspect`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DepartmentSummary {
    /// Department name.
    pub name: String,
    /// Records in the department.
    pub employees: usize,
    /// Distinct locations in first-seen order.
    pub locations: Vec<String>,
    /// Managers with their report counts.
    pub managers: Vec<ManagerChoice>,
}

/// Outcome of an `inspect` run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InspectionReport {
    /// Names of the roster files, comma separated.
    pub roster: String,
    /// Records read.
    pub records: usize,
    /// Departments in first-seen order.
    pub departments: Vec<DepartmentSummary>,
}

/// What a command produced, ready for rendering.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// Result of `generate`.
    Generated(Box<GenerationReport>),
    /// Result of `inspect`.
    Inspected(InspectionReport),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the roster or generating fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use orgtree_cli::cli::{Cli, Command, CommandOutput, GenerateCommand, InputSource, JsonArgs, OutputFormat, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(
///     file.path(),
///     r#"[{"name": "Alice", "dept": "X"}, {"name": "Bob", "dept": "X", "manager": "Alice"}]"#,
/// )?;
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         department: "X".into(),
///         manager: None,
///         location: None,
///         format: OutputFormat::Text,
///         source: InputSource::Json(JsonArgs { paths: vec![file.path().to_path_buf()] }),
///     }),
/// };
/// let CommandOutput::Generated(report) = run_cli(cli)? else {
///     panic!("generate yields a generation report");
/// };
/// assert_eq!(report.stats.total_employees, 2);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<CommandOutput, CliError> {
    match cli.command {
        Command::Generate(command) => {
            Span::current().record("command", field::display("generate"));
            run_generate(command).map(|report| CommandOutput::Generated(Box::new(report)))
        }
        Command::Inspect(command) => {
            Span::current().record("command", field::display("inspect"));
            run_inspect(command).map(CommandOutput::Inspected)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(department = %command.department, format = ?command.format),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<GenerationReport, CliError> {
    let GenerateCommand {
        department,
        manager,
        location,
        format,
        source,
    } = command;
    let (roster, records) = load_roster(source)?;
    let mut selection = Selection::new(department);
    if let Some(manager) = manager {
        selection = selection.with_manager(manager);
    }
    if let Some(location) = location {
        selection = selection.with_location(location);
    }

    let mut session = OrgSession::new(records);
    let generation = session.generate(selection.clone())?;
    let canvas = session.canvas_size().unwrap_or_default();
    let graph = session.graph().cloned().unwrap_or_default();
    info!(
        roster = roster.as_str(),
        nodes = graph.len(),
        "command completed"
    );
    Ok(GenerationReport {
        roster,
        selection,
        stats: generation.stats,
        metrics: generation.metrics,
        canvas,
        graph,
        format,
    })
}

#[instrument(name = "cli.inspect", err, skip(command))]
pub(super) fn run_inspect(command: InspectCommand) -> Result<InspectionReport, CliError> {
    let (roster, records) = load_roster(command.source)?;
    let session = OrgSession::new(records);
    let departments = session
        .departments()
        .into_iter()
        .map(|name| DepartmentSummary {
            name: name.to_owned(),
            employees: session
                .roster()
                .iter()
                .filter(|record| record.department == name)
                .count(),
            locations: session
                .locations(name)
                .into_iter()
                .map(str::to_owned)
                .collect(),
            managers: session.managers(name),
        })
        .collect();
    info!(roster = roster.as_str(), "command completed");
    Ok(InspectionReport {
        roster,
        records: session.roster().len(),
        departments,
    })
}

#[instrument(
    name = "cli.load_roster",
    err,
    skip(source),
    fields(kind = field::Empty, files = field::Empty, path = field::Empty, records = field::Empty),
)]
pub(super) fn load_roster(
    source: InputSource,
) -> Result<(String, Vec<EmployeeRecord>), CliError> {
    let span = Span::current();
    let (kind, paths) = match &source {
        InputSource::Json(JsonArgs { paths }) => ("json", paths),
        InputSource::Table(TableArgs { paths, .. }) => ("table", paths),
    };
    span.record("kind", kind);
    span.record("files", paths.len());
    let joined: Vec<String> = paths.iter().map(|path| path.display().to_string()).collect();
    span.record("path", field::display(joined.join(", ")));

    let mut names = Vec::with_capacity(paths.len());
    let mut records = Vec::new();
    for path in paths {
        let (name, batch) = match &source {
            InputSource::Json(_) => {
                let roster = JsonRoster::try_from_path(path)?;
                (roster.name().to_owned(), roster.into_records())
            }
            InputSource::Table(TableArgs { delimiter, .. }) => {
                let roster = TableRoster::try_from_path(path, (*delimiter).into())?;
                (roster.name().to_owned(), roster.into_records())
            }
        };
        debug!(roster = name.as_str(), records = batch.len(), "roster file loaded");
        names.push(name);
        records.extend(batch);
    }
    span.record("records", records.len());
    Ok((names.join(", "), records))
}
