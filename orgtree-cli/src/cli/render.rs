//! Text and JSON rendering of command output.

use std::{
    collections::HashSet,
    io::{self, Write},
};

use orgtree_core::{HierarchyGraph, HierarchyMetrics, NodeId, SummaryStats};
use serde::Serialize;

use super::commands::{CommandOutput, GenerationReport, InspectionReport, OutputFormat};

#[derive(Serialize)]
struct JsonReport<'a> {
    stats: &'a SummaryStats,
    metrics: &'a HierarchyMetrics,
    graph: &'a HierarchyGraph,
}

/// Renders `output` to `writer`.
///
/// Generation reports use the format they were requested in; inspection
/// reports are always text.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use orgtree_cli::cli::{CommandOutput, InspectionReport, render_output};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let output = CommandOutput::Inspected(InspectionReport {
///     roster: "empty.json".into(),
///     records: 0,
///     departments: Vec::new(),
/// });
/// let mut buffer = Vec::new();
/// render_output(&output, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "roster: empty.json (0 records)\n");
/// # Ok(())
/// # }
/// ```
pub fn render_output(output: &CommandOutput, mut writer: impl Write) -> io::Result<()> {
    match output {
        CommandOutput::Generated(report) => match report.format {
            OutputFormat::Text => render_generation(report, &mut writer),
            OutputFormat::Json => {
                let json = JsonReport {
                    stats: &report.stats,
                    metrics: &report.metrics,
                    graph: &report.graph,
                };
                serde_json::to_writer_pretty(&mut writer, &json)?;
                writeln!(writer)
            }
        },
        CommandOutput::Inspected(report) => render_inspection(report, &mut writer),
    }
}

fn render_generation(report: &GenerationReport, writer: &mut impl Write) -> io::Result<()> {
    let GenerationReport {
        roster,
        selection,
        stats,
        metrics,
        canvas,
        graph,
        format: _,
    } = report;
    writeln!(writer, "roster: {roster}")?;
    writeln!(writer, "department: {}", selection.department())?;
    if let Some(manager) = selection.manager() {
        writeln!(writer, "manager: {manager}")?;
    }
    if let Some(location) = selection.location() {
        writeln!(writer, "location: {location}")?;
    }
    writeln!(writer, "employees: {}", stats.total_employees)?;
    writeln!(writer, "managers: {}", stats.manager_count)?;
    if let Some(direct) = stats.direct_reports {
        writeln!(writer, "direct reports: {direct}")?;
    }
    if let Some(levels) = stats.levels_above {
        writeln!(writer, "levels above: {levels}")?;
    }
    writeln!(writer, "depth: {}", metrics.depth)?;
    writeln!(writer, "breadth: {}", metrics.breadth)?;
    writeln!(writer, "canvas: {:.0}x{:.0}", canvas.width, canvas.height)?;
    render_tree(graph, writer)
}

/// Writes the tree depth first, two spaces of indent per level. Each node is
/// printed once even if edges would revisit it.
fn render_tree(graph: &HierarchyGraph, writer: &mut impl Write) -> io::Result<()> {
    let Some(root) = graph.root() else {
        return Ok(());
    };
    let mut printed: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![(root, 0_usize)];
    while let Some((id, level)) = stack.pop() {
        if !printed.insert(id) {
            continue;
        }
        let Some(node) = graph.node(id) else {
            continue;
        };
        let indent = "  ".repeat(level);
        writeln!(writer, "{indent}[{}] {} ({})", node.kind, node.name, node.count)?;
        let children: Vec<NodeId> = graph.children(id).collect();
        stack.extend(children.into_iter().rev().map(|child| (child, level.saturating_add(1))));
    }
    Ok(())
}

fn render_inspection(report: &InspectionReport, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "roster: {} ({} records)", report.roster, report.records)?;
    for department in &report.departments {
        writeln!(
            writer,
            "department: {} ({} employees)",
            department.name, department.employees
        )?;
        if !department.locations.is_empty() {
            writeln!(writer, "  locations: {}", department.locations.join(", "))?;
        }
        for manager in &department.managers {
            writeln!(
                writer,
                "  manager: {} ({} reports)",
                manager.name, manager.reports
            )?;
        }
    }
    Ok(())
}
