//! Full-department assembly.

use std::collections::HashSet;

use tracing::{Span, debug, field, instrument};

use super::emit::{Assembly, GroupParent};
use crate::{
    graph::{HierarchyGraph, NodeId, NodeKind},
    name::NormalizedName,
    record::EmployeeRecord,
    structure::{ManagerEntry, ManagerStructure},
    telemetry,
};

/// Builds the whole department tree.
///
/// The department root holds one location/top-level-role run for employees
/// without a reporting manager, then every manager entry as a `manager`
/// node. Root managers (no reporting manager, or one outside `employees`)
/// hang under the root; the rest hang under their own manager's node when it
/// has already been materialized, else under the root. Each manager is
/// materialized once, so cyclic chains terminate with one link dropped.
///
/// Reports of a manager are grouped by location and job role but never
/// expanded further, even when a report is a manager in their own right;
/// their entry appears as a separate `manager` node instead.
///
/// # Examples
/// ```
/// use orgtree_core::{assemble_department, EmployeeRecord, ManagerStructure, NodeKind};
///
/// let roster = vec![
///     EmployeeRecord::new("Alice").with_location("NY"),
///     EmployeeRecord::new("Bob").with_location("NY").with_reporting_manager("Alice"),
/// ];
/// let structure = ManagerStructure::build(&roster);
/// let graph = assemble_department("X", &structure, &roster);
/// let root = graph.root().and_then(|id| graph.node(id)).expect("root");
/// assert_eq!(root.name, "X Department");
/// assert_eq!(root.count, 2);
/// assert_eq!(graph.nodes_of_kind(NodeKind::Manager).count(), 1);
/// ```
#[must_use]
#[instrument(
    name = "hierarchy.assemble_department",
    skip(department, structure, employees),
    fields(
        department = %department,
        employees = employees.len(),
        managers = structure.len(),
        nodes = field::Empty,
        edges = field::Empty,
    ),
)]
pub fn assemble_department(
    department: &str,
    structure: &ManagerStructure,
    employees: &[EmployeeRecord],
) -> HierarchyGraph {
    telemetry::record_assembly("department");
    let roster: HashSet<NormalizedName> =
        employees.iter().map(EmployeeRecord::normalized_name).collect();
    let mut assembly = Assembly::new();
    let root = assembly.department_root(department, employees.len());

    assembly.emit_groups(
        GroupParent::TopLevel(root),
        employees.iter().filter(|record| !record.has_reporting_manager()),
    );

    let mut processed: HashSet<NormalizedName> = HashSet::new();
    for entry in structure {
        let reports_outside = entry
            .manager()
            .reporting_manager_name()
            .is_none_or(|name| !roster.contains(&NormalizedName::new(name)));
        if reports_outside {
            materialize(&mut assembly, &mut processed, entry, root);
        }
    }

    for entry in structure {
        if processed.contains(entry.key()) {
            continue;
        }
        let parent = entry
            .manager()
            .reporting_manager_name()
            .and_then(|name| assembly.manager_node(&NormalizedName::new(name)));
        let parent = parent.unwrap_or_else(|| {
            debug!(manager = %entry.key(), "manager not yet placed; attaching to department root");
            root
        });
        materialize(&mut assembly, &mut processed, entry, parent);
    }

    let graph = assembly.finish();
    let span = Span::current();
    span.record("nodes", graph.len());
    span.record("edges", graph.edges().len());
    graph
}

fn materialize(
    assembly: &mut Assembly,
    processed: &mut HashSet<NormalizedName>,
    entry: &ManagerEntry,
    parent: NodeId,
) {
    if !processed.insert(entry.key().clone()) {
        return;
    }
    let node = assembly.person(entry.manager(), NodeKind::Manager);
    assembly.link(parent, node);
    assembly.emit_groups(GroupParent::Manager(node), entry.reports());
}
