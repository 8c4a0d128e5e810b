//! Unit tests for the CLI commands and report rendering.

use super::commands::{load_roster, run_generate};
use super::{
    Cli, CliError, Command, CommandOutput, DelimiterArg, GenerateCommand, InputSource,
    InspectCommand, JsonArgs, OutputFormat, TableArgs, render_output, run_cli,
};

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use orgtree_core::{OrgError, OrgErrorCode};
use orgtree_providers_json::JsonRosterError;
use orgtree_providers_table::TableRosterError;
use rstest::{fixture, rstest};
use tempfile::TempDir;
use tracing::Level;

use orgtree_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const ROSTER_JSON: &str = r#"[
    {"Employee Name": "Alice", "Department": "X", "Location": "NY", "Job Profile": "MGMT001-Director"},
    {"Employee Name": "Bob", "Department": "X", "Location": "NY", "Job Profile": "ENGR001-Engineer", "Reporting Manager": "Alice"},
    {"Employee Name": "Carol", "Department": "X", "Location": "NY", "Job Profile": "ENGR001-Engineer", "Reporting Manager": "alice "},
    {"Employee Name": "Sam", "Department": "Sales", "Location": "Leeds", "Job Profile": "SALE001-Rep"}
]"#;

const EXTRA_JSON: &str = r#"[
    {"Employee Name": "Dan", "Department": "X", "Location": "NY", "Job Profile": "ENGR001-Engineer", "Reporting Manager": "Alice"},
    {"Employee Name": "Tia", "Department": "Sales", "Location": "Leeds", "Job Profile": "SALE001-Rep", "Reporting Manager": "Sam"}
]"#;

const ROSTER_CSV: &str = "\
Name,Department,Location,Job Title,Manager
Alice,X,NY,MGMT001-Director,
Bob,X,NY,ENGR001-Engineer,Alice
Carol,X,NY,ENGR001-Engineer,alice
";

struct Fixture {
    _dir: TempDir,
    json: PathBuf,
    csv: PathBuf,
}

#[fixture]
fn files() -> Fixture {
    let dir = match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    };
    let json = write_file(&dir, "roster.json", ROSTER_JSON).expect("write json roster");
    let csv = write_file(&dir, "roster.csv", ROSTER_CSV).expect("write csv roster");
    Fixture {
        _dir: dir,
        json,
        csv,
    }
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

fn generate(source: InputSource, manager: Option<&str>, format: OutputFormat) -> GenerateCommand {
    GenerateCommand {
        department: "X".into(),
        manager: manager.map(str::to_owned),
        location: None,
        format,
        source,
    }
}

fn rendered(output: &CommandOutput) -> String {
    let mut buffer = Vec::new();
    render_output(output, &mut buffer).expect("render to memory");
    String::from_utf8(buffer).expect("utf-8 output")
}

#[rstest]
fn arguments_parse_into_nested_sources() {
    let cli = Cli::try_parse_from([
        "orgtree",
        "generate",
        "--department",
        "X",
        "--manager",
        "Bob",
        "--format",
        "json",
        "table",
        "people.csv",
        "more.csv",
        "--delimiter",
        "comma",
    ])
    .expect("arguments parse");
    let Command::Generate(command) = cli.command else {
        panic!("expected generate");
    };
    assert_eq!(command.manager.as_deref(), Some("Bob"));
    assert_eq!(command.format, OutputFormat::Json);
    let InputSource::Table(TableArgs { paths, delimiter }) = command.source else {
        panic!("expected a table source");
    };
    assert_eq!(paths, [PathBuf::from("people.csv"), PathBuf::from("more.csv")]);
    assert_eq!(delimiter, DelimiterArg::Comma);
}

#[rstest]
#[case(&["orgtree", "generate", "json", "people.json"])]
#[case(&["orgtree", "generate", "--department", "X", "json"])]
#[case(&["orgtree", "inspect", "table", "--delimiter", "comma"])]
fn required_arguments_are_enforced(#[case] args: &[&str]) {
    let err = Cli::try_parse_from(args).expect_err("argument missing");
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[rstest]
fn several_files_are_concatenated_in_order(files: Fixture) -> TestResult {
    let extra = write_file(&files._dir, "extra.json", EXTRA_JSON)?;
    let (roster, records) = load_roster(InputSource::Json(JsonArgs {
        paths: vec![files.json.clone(), extra.clone()],
    }))?;
    assert_eq!(roster, "roster.json, extra.json");
    let names: Vec<&str> = records.iter().map(|record| record.name.as_str()).collect();
    assert_eq!(names, ["Alice", "Bob", "Carol", "Sam", "Dan", "Tia"]);

    let cli = Cli {
        command: Command::Generate(generate(
            InputSource::Json(JsonArgs {
                paths: vec![files.json, extra],
            }),
            Some("Alice"),
            OutputFormat::Text,
        )),
    };
    let CommandOutput::Generated(report) = run_cli(cli)? else {
        panic!("expected a generation report");
    };
    assert_eq!(report.roster, "roster.json, extra.json");
    assert_eq!(report.stats.total_employees, 4);
    assert_eq!(report.stats.direct_reports, Some(3));
    Ok(())
}

#[rstest]
fn text_report_lists_summary_then_tree(files: Fixture) -> TestResult {
    let cli = Cli {
        command: Command::Generate(generate(
            InputSource::Json(JsonArgs { paths: vec![files.json] }),
            None,
            OutputFormat::Text,
        )),
    };
    let text = rendered(&run_cli(cli)?);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.first().copied(), Some("roster: roster.json"));
    assert!(lines.contains(&"employees: 3"));
    assert!(lines.contains(&"managers: 1"));
    assert!(lines.contains(&"canvas: 3000x3000"));
    assert!(lines.contains(&"[department] X Department (3)"));
    assert!(lines.contains(&"  [manager] Alice (2)"));
    assert!(!text.contains("direct reports"));
    Ok(())
}

#[rstest]
fn json_report_carries_stats_metrics_and_graph(files: Fixture) -> TestResult {
    let cli = Cli {
        command: Command::Generate(generate(
            InputSource::Table(TableArgs {
                paths: vec![files.csv],
                delimiter: DelimiterArg::Comma,
            }),
            Some("Alice"),
            OutputFormat::Json,
        )),
    };
    let text = rendered(&run_cli(cli)?);
    let value: serde_json::Value = serde_json::from_str(&text)?;
    assert_eq!(value["stats"]["direct_reports"], 2);
    assert_eq!(value["stats"]["levels_above"], 0);
    assert!(value["metrics"]["depth"].as_u64().is_some_and(|depth| depth >= 3));
    let nodes = value["graph"]["nodes"].as_array().expect("nodes array");
    assert!(nodes.iter().any(|node| node["type"] == "manager" && node["name"] == "Alice"));
    Ok(())
}

#[rstest]
fn inspect_lists_departments_locations_and_managers(files: Fixture) -> TestResult {
    let cli = Cli {
        command: Command::Inspect(InspectCommand {
            source: InputSource::Json(JsonArgs { paths: vec![files.json] }),
        }),
    };
    let output = run_cli(cli)?;
    let CommandOutput::Inspected(report) = &output else {
        panic!("expected an inspection report");
    };
    assert_eq!(report.records, 4);
    assert_eq!(report.departments.len(), 2);
    let text = rendered(&output);
    assert_eq!(
        text,
        "roster: roster.json (4 records)\n\
         department: X (3 employees)\n  locations: NY\n  manager: Alice (2 reports)\n\
         department: Sales (1 employees)\n  locations: Leeds\n"
    );
    Ok(())
}

#[rstest]
#[case(Some("Zed"), OrgErrorCode::ManagerNotFound)]
fn core_failures_keep_their_code(
    files: Fixture,
    #[case] manager: Option<&str>,
    #[case] code: OrgErrorCode,
) {
    let command = generate(
        InputSource::Json(JsonArgs { paths: vec![files.json] }),
        manager,
        OutputFormat::Text,
    );
    let err = run_generate(command).expect_err("generation fails");
    match err {
        CliError::Core(core) => assert_eq!(core.code(), code),
        other => panic!("expected a core error, got {other:?}"),
    }
}

#[rstest]
fn empty_selection_is_reported(files: Fixture) {
    let mut command = generate(
        InputSource::Json(JsonArgs { paths: vec![files.json] }),
        None,
        OutputFormat::Text,
    );
    command.location = Some("Tokyo".into());
    let err = run_generate(command).expect_err("no one in tokyo");
    assert!(matches!(
        err,
        CliError::Core(OrgError::EmptySelection { ref location, .. }) if location.as_deref() == Some("Tokyo")
    ));
}

#[rstest]
fn provider_failures_are_wrapped(files: Fixture) {
    let missing = files.json.with_file_name("missing.json");
    let err = load_roster(InputSource::Json(JsonArgs {
        paths: vec![missing],
    }))
    .expect_err("missing file");
    assert!(matches!(err, CliError::Json(JsonRosterError::Io(_))));

    let err = load_roster(InputSource::Table(TableArgs {
        paths: vec![files.json],
        delimiter: DelimiterArg::Tab,
    }))
    .expect_err("json is not a table");
    assert!(matches!(err, CliError::Table(TableRosterError::NoKnownColumns { .. })));
}

#[rstest]
fn generate_records_command_spans(files: Fixture) -> TestResult {
    let cli = Cli {
        command: Command::Generate(generate(
            InputSource::Json(JsonArgs { paths: vec![files.json] }),
            None,
            OutputFormat::Text,
        )),
    };
    let (result, layer) = RecordingLayer::capture(|| run_cli(cli));
    result?;

    let run = layer.span("cli.run").expect("cli.run span");
    assert_eq!(run.field("command"), Some("generate"));
    let load = layer.span("cli.load_roster").expect("load span");
    assert_eq!(load.field("kind"), Some("json"));
    assert_eq!(load.field("records"), Some("4"));
    assert_eq!(load.field("files"), Some("1"));
    assert!(load.field("path").is_some_and(|path| path.ends_with("roster.json")));
    assert!(layer.span("session.generate").is_some());
    assert!(
        layer
            .events_at(Level::INFO)
            .iter()
            .any(|event| event.message() == Some("command completed"))
    );
    Ok(())
}
