//! Depth and breadth of an assembled hierarchy, used to size the canvas.

use std::collections::HashSet;

use serde::Serialize;

use super::{HierarchyGraph, NodeId};

/// Depth and breadth of a hierarchy measured from its root.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct HierarchyMetrics {
    /// Number of levels below and including the root; 0 without a root.
    pub depth: usize,
    /// Largest number of nodes on any one level.
    pub breadth: usize,
}

/// Measures depth and breadth in a single walk from the root.
///
/// Each node is visited once, so cycles introduced by edits cannot loop.
///
/// # Examples
/// ```
/// use orgtree_core::{measure, HierarchyGraph, NewNode, NodeKind};
///
/// let mut graph = HierarchyGraph::new();
/// let root = graph.add_node(NewNode::new("Dept", NodeKind::Department));
/// graph.add_node(NewNode::new("A", NodeKind::Manager).with_parent(root));
/// graph.add_node(NewNode::new("B", NodeKind::Manager).with_parent(root));
/// let metrics = measure(&graph);
/// assert_eq!((metrics.depth, metrics.breadth), (2, 2));
/// ```
#[must_use]
pub fn measure(graph: &HierarchyGraph) -> HierarchyMetrics {
    let mut per_level: Vec<usize> = Vec::new();
    for visit in graph.breadth_first() {
        if let Some(slot) = per_level.get_mut(visit.level) {
            *slot = slot.saturating_add(1);
        } else {
            per_level.push(1);
        }
    }
    HierarchyMetrics {
        depth: per_level.len(),
        breadth: per_level.iter().copied().max().unwrap_or(0),
    }
}

/// Number of levels from the root to the deepest reachable node.
#[must_use]
pub fn depth(graph: &HierarchyGraph) -> usize {
    measure(graph).depth
}

/// Largest number of nodes sharing one level.
#[must_use]
pub fn breadth(graph: &HierarchyGraph) -> usize {
    measure(graph).breadth
}

/// Edge hops from `id` up to a node with no parent.
///
/// Returns `None` for an unknown id. A parent cycle stops the walk at the
/// first repeated node.
#[must_use]
pub fn node_depth(graph: &HierarchyGraph, id: NodeId) -> Option<usize> {
    if !graph.contains(id) {
        return None;
    }
    let mut seen = HashSet::from([id]);
    let mut hops = 0_usize;
    let mut current = id;
    while let Some(parent) = graph.parent(current) {
        if !seen.insert(parent) {
            break;
        }
        hops = hops.saturating_add(1);
        current = parent;
    }
    Some(hops)
}
