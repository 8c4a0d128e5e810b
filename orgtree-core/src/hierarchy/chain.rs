//! Single-manager chain assembly: ancestors above, the full org below.

use std::collections::HashSet;

use tracing::{Span, field, instrument, warn};

use super::emit::{Assembly, GroupParent};
use crate::{
    graph::{HierarchyGraph, NodeId, NodeKind},
    name::NormalizedName,
    record::EmployeeRecord,
    roster::RosterIndex,
    structure::ManagerStructure,
    telemetry,
};

/// Builds `manager`'s chain, deriving the manager structure from `employees`.
///
/// See [`assemble_chain_with`].
#[must_use]
pub fn assemble_chain(manager: &EmployeeRecord, employees: &[EmployeeRecord]) -> HierarchyGraph {
    let structure = ManagerStructure::build(employees);
    assemble_chain_with(manager, &structure, employees)
}

/// Builds `manager`'s chain against a prebuilt structure.
///
/// The upward pass resolves reporting managers one hop at a time (exact,
/// fuzzy, then placeholder) against a fresh lookup of `employees`, emitting
/// a node per ancestor linked above its subordinate. It stops at a person
/// with no reporting manager or at a name already visited. The topmost
/// ancestor becomes the root.
///
/// The downward pass groups the manager's reports by location and job role
/// and, unlike department assembly, expands every report who is a manager
/// in their own right beneath their job-role node. Each manager is expanded
/// at most once, so cycles terminate.
///
/// # Examples
/// ```
/// use orgtree_core::{assemble_chain, EmployeeRecord, NodeKind};
///
/// let roster = vec![
///     EmployeeRecord::new("Ann"),
///     EmployeeRecord::new("Ben").with_reporting_manager("Ann"),
///     EmployeeRecord::new("Cat").with_reporting_manager("Ben"),
/// ];
/// let graph = assemble_chain(&roster[1], &roster);
/// let root = graph.root().and_then(|id| graph.node(id)).expect("root");
/// assert_eq!(root.name, "Ann");
/// assert_eq!(graph.nodes_of_kind(NodeKind::Manager).count(), 2);
/// ```
#[must_use]
#[instrument(
    name = "hierarchy.assemble_chain",
    skip(manager, structure, employees),
    fields(
        manager = %manager.name,
        employees = employees.len(),
        levels_above = field::Empty,
        nodes = field::Empty,
        edges = field::Empty,
    ),
)]
pub fn assemble_chain_with(
    manager: &EmployeeRecord,
    structure: &ManagerStructure,
    employees: &[EmployeeRecord],
) -> HierarchyGraph {
    telemetry::record_assembly("chain");
    let mut assembly = Assembly::new();
    let (root, levels_above) = emit_ancestors(&mut assembly, manager, structure, employees);
    assembly.set_root(Some(root));
    emit_descendants(&mut assembly, manager, structure);

    let graph = assembly.finish();
    let span = Span::current();
    span.record("levels_above", levels_above);
    span.record("nodes", graph.len());
    span.record("edges", graph.edges().len());
    graph
}

/// Emits `manager` and every resolvable ancestor, returning the topmost node
/// and the number of ancestors emitted.
fn emit_ancestors(
    assembly: &mut Assembly,
    manager: &EmployeeRecord,
    structure: &ManagerStructure,
    employees: &[EmployeeRecord],
) -> (NodeId, usize) {
    let mut roster = RosterIndex::new(employees);
    let start = manager.normalized_name();
    let mut top = assembly.person(manager, person_kind(structure, &start));
    let mut processed = HashSet::from([start]);
    let mut current = manager.clone();
    let mut levels = 0_usize;
    while let Some(next) = current
        .reporting_manager_name()
        .and_then(|name| roster.resolve(name, &current.department))
    {
        if !processed.insert(next.key.clone()) {
            warn!(manager = %next.record.name, "reporting chain loops; dropping the repeated link");
            break;
        }
        let node = assembly.person(&next.record, person_kind(structure, &next.key));
        assembly.link(node, top);
        top = node;
        levels = levels.saturating_add(1);
        current = next.record;
    }
    (top, levels)
}

fn person_kind(structure: &ManagerStructure, key: &NormalizedName) -> NodeKind {
    if structure.contains(key) {
        NodeKind::Manager
    } else {
        NodeKind::Employee
    }
}

/// Expands `manager`'s reports, recursing through reports who manage others.
fn emit_descendants(assembly: &mut Assembly, manager: &EmployeeRecord, structure: &ManagerStructure) {
    let mut expanded: HashSet<NormalizedName> = HashSet::new();
    let mut pending: Vec<(NormalizedName, Option<NodeId>)> = vec![(manager.normalized_name(), None)];
    while let Some((key, parent)) = pending.pop() {
        let Some(entry) = structure.get(&key) else {
            continue;
        };
        if !expanded.insert(key.clone()) {
            continue;
        }
        let node = match assembly.manager_node(&key) {
            Some(existing) => existing,
            None => {
                let created = assembly.person(entry.manager(), NodeKind::Manager);
                if let Some(parent) = parent {
                    assembly.link(parent, created);
                }
                created
            }
        };
        let roles = assembly.emit_groups(GroupParent::Manager(node), entry.reports());
        let next: Vec<(NormalizedName, Option<NodeId>)> = roles
            .iter()
            .flat_map(|role| {
                role.members
                    .iter()
                    .map(|member| member.normalized_name())
                    .filter(|member| structure.contains(member))
                    .map(|member| (member, Some(role.node)))
            })
            .collect();
        pending.extend(next.into_iter().rev());
    }
}
