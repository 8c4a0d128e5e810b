//! Unit tests for graph storage, edits and metrics.

use rstest::{fixture, rstest};

use super::*;

/// ```text
/// 0 root
/// └── 1 parent
///     └── 2 middle
///         ├── 3 left
///         │   └── 5 grandchild
///         └── 4 right
/// ```
struct Chain {
    graph: HierarchyGraph,
    root: NodeId,
    parent: NodeId,
    middle: NodeId,
    left: NodeId,
    right: NodeId,
    grandchild: NodeId,
}

#[fixture]
fn chain() -> Chain {
    let mut graph = HierarchyGraph::new();
    let root = graph.add_node(NewNode::new("Dept", NodeKind::Department));
    let parent = graph.add_node(NewNode::new("P", NodeKind::Manager).with_parent(root));
    let middle = graph.add_node(NewNode::new("M", NodeKind::Manager).with_parent(parent));
    let left = graph.add_node(NewNode::new("L", NodeKind::Location).with_parent(middle));
    let right = graph.add_node(NewNode::new("R", NodeKind::Location).with_parent(middle));
    let grandchild = graph.add_node(NewNode::new("G", NodeKind::JobRole).with_parent(left));
    Chain {
        graph,
        root,
        parent,
        middle,
        left,
        right,
        grandchild,
    }
}

#[rstest]
fn ids_are_allocated_from_zero(chain: Chain) {
    let ids: Vec<u64> = chain.graph.nodes().iter().map(|n| n.id.get()).collect();
    assert_eq!(ids, [0, 1, 2, 3, 4, 5]);
    assert_eq!(chain.graph.next_id(), NodeId::new(6));
    assert_eq!(chain.graph.root(), Some(chain.root));
}

#[rstest]
fn splice_reattaches_children_to_parent(mut chain: Chain) {
    let removed = chain.graph.delete_node(chain.middle, DeleteMode::Splice);
    assert_eq!(removed, [chain.middle]);
    assert!(!chain.graph.contains(chain.middle));
    assert_eq!(chain.graph.parent(chain.left), Some(chain.parent));
    assert_eq!(chain.graph.parent(chain.right), Some(chain.parent));
    assert_eq!(chain.graph.parent(chain.grandchild), Some(chain.left));
    assert!(
        chain
            .graph
            .edges()
            .iter()
            .all(|e| e.source != chain.middle && e.target != chain.middle)
    );
}

#[rstest]
fn splice_without_parent_leaves_children_as_roots(mut chain: Chain) {
    chain.graph.delete_node(chain.root, DeleteMode::Splice);
    assert_eq!(chain.graph.roots(), [chain.parent]);
    assert_eq!(chain.graph.root(), Some(chain.parent));
}

#[rstest]
fn cascade_removes_whole_subtree(mut chain: Chain) {
    let removed = chain.graph.delete_node(chain.middle, DeleteMode::Cascade);
    assert_eq!(
        removed,
        [chain.middle, chain.left, chain.right, chain.grandchild]
    );
    let remaining: Vec<NodeId> = chain.graph.nodes().iter().map(|n| n.id).collect();
    assert_eq!(remaining, [chain.root, chain.parent]);
    assert_eq!(chain.graph.edges().len(), 1);
}

#[rstest]
fn cascading_the_root_empties_the_graph(mut chain: Chain) {
    let removed = chain.graph.delete_node(chain.root, DeleteMode::Cascade);
    assert_eq!(removed.len(), 6);
    assert!(chain.graph.is_empty());
    assert_eq!(chain.graph.root(), None);
    assert_eq!(measure(&chain.graph), HierarchyMetrics::default());
}

#[rstest]
#[case(DeleteMode::Splice)]
#[case(DeleteMode::Cascade)]
fn deleting_unknown_ids_is_a_no_op(mut chain: Chain, #[case] mode: DeleteMode) {
    let before = chain.graph.clone();
    assert!(chain.graph.delete_node(NodeId::new(99), mode).is_empty());
    assert_eq!(chain.graph, before);
}

#[rstest]
fn dangling_parent_is_accepted(mut chain: Chain) {
    let id = chain
        .graph
        .add_node(NewNode::new("Orphan", NodeKind::Employee).with_parent(NodeId::new(42)));
    assert_eq!(id, NodeId::new(6));
    assert_eq!(chain.graph.parent(id), Some(NodeId::new(42)));
    assert_eq!(measure(&chain.graph).depth, 5);
}

#[rstest]
fn added_nodes_continue_after_deletion(mut chain: Chain) {
    chain.graph.delete_node(chain.right, DeleteMode::Splice);
    let id = chain.graph.add_node(NewNode::new("New", NodeKind::Employee));
    assert_eq!(id, NodeId::new(6));
}

#[rstest]
fn metrics_follow_levels(chain: Chain) {
    assert_eq!(
        measure(&chain.graph),
        HierarchyMetrics {
            depth: 5,
            breadth: 2
        }
    );
    assert_eq!(depth(&chain.graph), 5);
    assert_eq!(breadth(&chain.graph), 2);
}

#[rstest]
fn node_depth_counts_hops(chain: Chain) {
    assert_eq!(node_depth(&chain.graph, chain.root), Some(0));
    assert_eq!(node_depth(&chain.graph, chain.grandchild), Some(4));
    assert_eq!(node_depth(&chain.graph, NodeId::new(77)), None);
}

#[rstest]
fn metrics_survive_cycles(mut chain: Chain) {
    chain.graph.link(chain.grandchild, chain.parent);
    assert_eq!(measure(&chain.graph).depth, 5);
    assert_eq!(node_depth(&chain.graph, chain.parent), Some(1));
}

#[rstest]
fn recount_sums_member_nodes() {
    let mut graph = HierarchyGraph::new();
    let root = graph.insert(NodeKind::Department, NodeDraft::default());
    let manager = graph.insert(
        NodeKind::Manager,
        NodeDraft {
            employees: vec![EmployeeRecord::new("Boss")],
            ..NodeDraft::default()
        },
    );
    let role = graph.insert(
        NodeKind::JobRole,
        NodeDraft {
            employees: vec![EmployeeRecord::new("A"), EmployeeRecord::new("B")],
            ..NodeDraft::default()
        },
    );
    let top = graph.insert(
        NodeKind::TopLevelRole,
        NodeDraft {
            employees: vec![EmployeeRecord::new("C")],
            ..NodeDraft::default()
        },
    );
    graph.link(root, manager);
    graph.link(manager, role);
    graph.link(root, top);
    graph.recount();
    let counts: Vec<usize> = graph.nodes().iter().map(|n| n.count).collect();
    assert_eq!(counts, [3, 2, 2, 1]);
}

#[rstest]
fn serializes_wire_names(chain: Chain) {
    let value = serde_json::to_value(&chain.graph).expect("serialize graph");
    assert_eq!(value["nodes"][0]["type"], "department");
    assert_eq!(value["nodes"][5]["type"], "job-role");
    assert_eq!(value["edges"][0]["source"], 0);
    assert_eq!(value["root"], 0);
}

#[rstest]
fn reseed_ids_follows_largest_id(chain: Chain) {
    let json = serde_json::json!({
        "nodes": serde_json::to_value(chain.graph.nodes()).expect("nodes"),
        "edges": [],
        "root": 0,
    });
    let mut graph: HierarchyGraph = serde_json::from_value(json).expect("graph");
    assert_eq!(graph.next_id(), NodeId::new(0));
    graph.reseed_ids();
    assert_eq!(graph.next_id(), NodeId::new(6));
}
