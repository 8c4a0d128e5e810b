#![expect(clippy::expect_used, reason = "tests require contextual panics")]
//! End-to-end tests from raw records to assembled graphs.

mod common;

use std::collections::HashMap;

use common::{company, person};
use orgtree_core::{
    DeleteMode, EmployeeRecord, HierarchyGraph, ManagerStructure, NewNode, NodeId, NodeKind,
    Resolution, RosterSource, Selection, assemble_chain, assemble_department, measure,
};
use rstest::rstest;

fn parents(graph: &HierarchyGraph) -> HashMap<NodeId, Vec<NodeId>> {
    let mut parents: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    for edge in graph.edges() {
        parents.entry(edge.target).or_default().push(edge.source);
    }
    parents
}

fn department(name: &str) -> Vec<EmployeeRecord> {
    Selection::new(name).filter(company().records())
}

#[rstest]
fn trimmed_and_cased_manager_text_resolves_to_one_entry() {
    let roster = vec![
        EmployeeRecord::new("Alice"),
        EmployeeRecord::new("Bob")
            .with_reporting_manager("Alice")
            .with_department("X")
            .with_location("NY")
            .with_job_profile("Eng"),
        EmployeeRecord::new("Carol")
            .with_reporting_manager("alice ")
            .with_department("X")
            .with_location("NY")
            .with_job_profile("Eng"),
    ];
    let structure = ManagerStructure::build(&roster);
    assert_eq!(structure.len(), 1);
    let alice = structure.find("Alice").expect("alice entry");
    let reports: Vec<&str> = alice.reports().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(reports, ["Bob", "Carol"]);
    assert_eq!(alice.resolution(), Resolution::Exact);
}

#[rstest]
fn department_graph_is_a_tree_covering_every_employee() {
    let employees = department("X");
    let structure = ManagerStructure::build(&employees);
    let graph = assemble_department("X", &structure, &employees);

    let root = graph.root().expect("root");
    let parents = parents(&graph);
    for node in graph.nodes() {
        let incoming = parents.get(&node.id).map_or(0, Vec::len);
        assert_eq!(incoming, usize::from(node.id != root), "node {}", node.name);
    }
    let members: usize = graph
        .nodes()
        .iter()
        .filter(|node| matches!(node.kind, NodeKind::JobRole | NodeKind::TopLevelRole))
        .map(|node| node.employees.len())
        .sum();
    assert_eq!(members, employees.len());
    assert_eq!(graph.node(root).map(|node| node.count), Some(employees.len()));
    assert!(
        graph
            .nodes_of_kind(NodeKind::Manager)
            .any(|node| node.name == "Frank Ghost")
    );
}

#[rstest]
fn chain_runs_from_the_top_ancestor_through_every_descendant() {
    let employees = department("X");
    let bob = employees
        .iter()
        .find(|record| record.name == "Bob")
        .expect("bob");
    let graph = assemble_chain(bob, &employees);

    let root = graph.root().and_then(|id| graph.node(id)).expect("root");
    assert_eq!(root.name, "Alice");
    let people: Vec<&str> = graph
        .nodes()
        .iter()
        .filter(|node| matches!(node.kind, NodeKind::Manager | NodeKind::Employee))
        .map(|node| node.name.as_str())
        .collect();
    assert_eq!(people, ["Bob", "Alice"]);
    let dan_role = graph
        .nodes_of_kind(NodeKind::JobRole)
        .find(|node| node.employees.iter().any(|record| record.name == "Dan"))
        .expect("dan grouped under bob");
    assert_eq!(dan_role.count, 1);
    assert!(graph.nodes().iter().all(|node| node.name != "Carol"));
}

#[rstest]
fn mutual_reports_terminate() {
    let roster = vec![person("Ann", "Ben", "X"), person("Ben", "Ann", "X")];
    let ann = roster.first().expect("ann");
    let graph = assemble_chain(ann, &roster);
    assert!(graph.nodes().iter().any(|node| node.name == "Ann"));
    assert!(measure(&graph).depth >= 2);

    let structure = ManagerStructure::build(&roster);
    let department = assemble_department("X", &structure, &roster);
    assert_eq!(department.node(NodeId::new(0)).map(|node| node.count), Some(2));
}

#[rstest]
fn splice_and_cascade_deletion() {
    let mut graph = HierarchyGraph::new();
    let top = graph.add_node(NewNode::new("Top", NodeKind::Department));
    let middle = graph.add_node(NewNode::new("Middle", NodeKind::Manager).with_parent(top));
    let left = graph.add_node(NewNode::new("Left", NodeKind::Employee).with_parent(middle));
    let right = graph.add_node(NewNode::new("Right", NodeKind::Employee).with_parent(middle));
    let leaf = graph.add_node(NewNode::new("Leaf", NodeKind::Employee).with_parent(left));

    let mut spliced = graph.clone();
    assert_eq!(spliced.delete_node(middle, DeleteMode::Splice), [middle]);
    assert!(!spliced.contains(middle));
    assert_eq!(spliced.parent(left), Some(top));
    assert_eq!(spliced.parent(right), Some(top));
    assert_eq!(spliced.parent(leaf), Some(left));

    let mut removed = graph.delete_node(middle, DeleteMode::Cascade);
    removed.sort();
    assert_eq!(removed, [middle, left, right, leaf]);
    assert_eq!(graph.len(), 1);
    assert!(graph.edges().is_empty());
}
