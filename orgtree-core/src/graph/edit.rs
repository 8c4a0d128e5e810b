//! Post-assembly edits: adding and deleting nodes.

use std::collections::{HashSet, VecDeque};

use tracing::{instrument, warn};

use super::{HierarchyGraph, NodeDraft, NodeId, NodeKind};

/// How [`HierarchyGraph::delete_node`] treats the deleted node's subtree.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DeleteMode {
    /// Remove only the node and reattach its children to its parent.
    #[default]
    Splice,
    /// Remove the node together with every descendant.
    Cascade,
}

/// A hand-added node.
///
/// # Examples
/// ```
/// use orgtree_core::{HierarchyGraph, NewNode, NodeKind};
///
/// let mut graph = HierarchyGraph::new();
/// let root = graph.add_node(NewNode::new("Board", NodeKind::Department));
/// let child = graph.add_node(
///     NewNode::new("Advisor", NodeKind::Employee)
///         .with_parent(root)
///         .with_description("External"),
/// );
/// assert_eq!(graph.parent(child), Some(root));
/// assert_eq!(graph.root(), Some(root));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewNode {
    name: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    count: usize,
    description: Option<String>,
}

impl NewNode {
    /// Describes a parentless node with a zero count.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            count: 0,
            description: None,
        }
    }

    /// Links the node beneath `parent`.
    #[must_use]
    pub const fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the displayed employee count.
    #[must_use]
    pub const fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl HierarchyGraph {
    /// Appends a node with the next free id and, when a parent is given, a
    /// parent → node edge.
    ///
    /// The parent is not validated: an unknown parent leaves a dangling edge,
    /// which is logged and otherwise ignored by readers.
    #[instrument(
        name = "graph.add_node",
        skip(self, node),
        fields(kind = %node.kind, parent = ?node.parent),
    )]
    pub fn add_node(&mut self, node: NewNode) -> NodeId {
        let NewNode {
            name,
            kind,
            parent,
            count,
            description,
        } = node;
        if let Some(parent) = parent.filter(|&parent| !self.contains(parent)) {
            warn!(%parent, "adding node beneath an unknown parent");
        }
        let id = self.insert(
            kind,
            NodeDraft {
                label: name.clone(),
                name,
                count,
                description,
                ..NodeDraft::default()
            },
        );
        if let Some(parent) = parent {
            self.link(parent, id);
        }
        id
    }

    /// Deletes `id` and returns every removed node id.
    ///
    /// [`DeleteMode::Splice`] redirects the node's child edges to its parent,
    /// or drops them when it has none, leaving the children as roots.
    /// [`DeleteMode::Cascade`] removes the node and its whole subtree. When
    /// the root goes, the first remaining parentless node (if any) takes
    /// over. An unknown id is a no-op returning an empty list.
    #[instrument(name = "graph.delete_node", skip(self))]
    pub fn delete_node(&mut self, id: NodeId, mode: DeleteMode) -> Vec<NodeId> {
        if !self.contains(id) {
            warn!(%id, "delete requested for unknown node");
            return Vec::new();
        }
        match mode {
            DeleteMode::Splice => self.splice_out(id),
            DeleteMode::Cascade => self.remove_subtree(id),
        }
    }

    /// Every node reachable from `id` through child edges, breadth first,
    /// excluding `id` itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let children = self.adjacency();
        let mut seen = HashSet::from([id]);
        let mut found = Vec::new();
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            for &child in children.get(&current).into_iter().flatten() {
                if seen.insert(child) {
                    found.push(child);
                    queue.push_back(child);
                }
            }
        }
        found
    }

    fn splice_out(&mut self, id: NodeId) -> Vec<NodeId> {
        let parent = self.parent(id).filter(|&parent| parent != id);
        let first_child = self.children(id).find(|&child| child != id);
        match parent {
            Some(parent) => {
                for edge in self.edges.iter_mut().filter(|edge| edge.source == id) {
                    edge.source = parent;
                }
            }
            None => self.edges.retain(|edge| edge.source != id),
        }
        self.edges.retain(|edge| edge.target != id);
        self.nodes.retain(|node| node.id != id);
        if self.root == Some(id) {
            self.root = parent.or(first_child);
        }
        vec![id]
    }

    fn remove_subtree(&mut self, id: NodeId) -> Vec<NodeId> {
        let mut removed = vec![id];
        removed.extend(self.descendants(id));
        let doomed: HashSet<NodeId> = removed.iter().copied().collect();
        self.nodes.retain(|node| !doomed.contains(&node.id));
        self.edges
            .retain(|edge| !doomed.contains(&edge.source) && !doomed.contains(&edge.target));
        if self.root.is_some_and(|root| doomed.contains(&root)) {
            self.root = self.roots().first().copied();
        }
        removed
    }
}
