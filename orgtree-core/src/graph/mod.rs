//! Typed node/edge graph produced by hierarchy assembly.
//!
//! A [`HierarchyGraph`] owns its nodes and parent→child edges, allocates node
//! ids from a counter scoped to the graph, and records its root explicitly
//! rather than relying on node order.

mod edit;
mod metrics;

use std::{
    collections::{HashMap, HashSet, VecDeque},
    fmt,
};

use serde::{Deserialize, Serialize};

use crate::record::EmployeeRecord;

pub use self::{
    edit::{DeleteMode, NewNode},
    metrics::{HierarchyMetrics, breadth, depth, measure, node_depth},
};

/// Identifier of a node, unique within one graph.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    const fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a node in the hierarchy.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// The department root.
    Department,
    /// A person who manages others.
    Manager,
    /// A display job role under a manager's location.
    JobRole,
    /// A display job role of employees with no reporting manager.
    TopLevelRole,
    /// A location grouping.
    Location,
    /// A person who manages nobody.
    Employee,
}

impl NodeKind {
    /// Returns the stable wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Manager => "manager",
            Self::JobRole => "job-role",
            Self::TopLevelRole => "top-level-role",
            Self::Location => "location",
            Self::Employee => "employee",
        }
    }

    /// Whether records attached to nodes of this kind count as employees
    /// of the subtree.
    #[must_use]
    pub const fn counts_members(self) -> bool {
        matches!(self, Self::JobRole | Self::TopLevelRole | Self::Employee)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the hierarchy.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HierarchyNode {
    /// Graph-scoped identifier.
    pub id: NodeId,
    /// Short name: a person, location, role or department.
    pub name: String,
    /// Node role.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Employees beneath this node at assembly time.
    pub count: usize,
    /// Records attached directly to this node.
    #[serde(default)]
    pub employees: Vec<EmployeeRecord>,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Free-text description supplied for hand-added nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Manager node a location or job-role grouping belongs to.
    #[serde(default, rename = "managerId", skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<NodeId>,
}

/// Directed parent → child link.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct HierarchyEdge {
    /// Parent node.
    pub source: NodeId,
    /// Child node.
    pub target: NodeId,
}

/// Node fields supplied by assembly; the graph allocates the id.
#[derive(Clone, Debug, Default)]
pub(crate) struct NodeDraft {
    pub(crate) name: String,
    pub(crate) label: String,
    pub(crate) employees: Vec<EmployeeRecord>,
    pub(crate) manager_id: Option<NodeId>,
    pub(crate) description: Option<String>,
    pub(crate) count: usize,
}

/// A hierarchy of typed nodes joined by parent → child edges.
///
/// Assembly produces a tree. Edits may transiently leave several roots or a
/// dangling edge; readers tolerate both.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct HierarchyGraph {
    nodes: Vec<HierarchyNode>,
    edges: Vec<HierarchyEdge>,
    root: Option<NodeId>,
    #[serde(default)]
    next_id: NodeId,
}

impl HierarchyGraph {
    /// Creates an empty graph whose id counter starts at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.nodes
    }

    /// Edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[HierarchyEdge] {
        &self.edges
    }

    /// The explicit root, if any.
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Id the next added node receives.
    #[must_use]
    pub const fn next_id(&self) -> NodeId {
        self.next_id
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Returns whether a node with `id` exists.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Parent of `id` through its first incoming edge.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.edges
            .iter()
            .find(|edge| edge.target == id)
            .map(|edge| edge.source)
    }

    /// Children of `id` in edge order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges
            .iter()
            .filter(move |edge| edge.source == id)
            .map(|edge| edge.target)
    }

    /// Nodes whose kind is `kind`, in insertion order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &HierarchyNode> + '_ {
        self.nodes.iter().filter(move |node| node.kind == kind)
    }

    /// Nodes without an incoming edge, in insertion order.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        let targets: HashSet<NodeId> = self.edges.iter().map(|edge| edge.target).collect();
        self.nodes
            .iter()
            .map(|node| node.id)
            .filter(|id| !targets.contains(id))
            .collect()
    }

    /// Re-establishes the id allocator after nodes were loaded wholesale:
    /// the next id becomes one past the largest existing id.
    pub fn reseed_ids(&mut self) {
        self.next_id = self
            .nodes
            .iter()
            .map(|node| node.id.successor())
            .max()
            .unwrap_or_default();
    }

    pub(crate) fn insert(&mut self, kind: NodeKind, draft: NodeDraft) -> NodeId {
        let id = self.next_id;
        self.next_id = id.successor();
        self.nodes.push(HierarchyNode {
            id,
            name: draft.name,
            kind,
            count: draft.count,
            employees: draft.employees,
            label: draft.label,
            description: draft.description,
            manager_id: draft.manager_id,
        });
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    pub(crate) fn link(&mut self, source: NodeId, target: NodeId) {
        self.edges.push(HierarchyEdge { source, target });
    }

    pub(crate) const fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    /// Adjacency restricted to edges whose endpoints both exist.
    pub(crate) fn adjacency(&self) -> HashMap<NodeId, Vec<NodeId>> {
        let present: HashSet<NodeId> = self.nodes.iter().map(|node| node.id).collect();
        let mut children: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for edge in &self.edges {
            if present.contains(&edge.source) && present.contains(&edge.target) {
                children.entry(edge.source).or_default().push(edge.target);
            }
        }
        children
    }

    /// Breadth-first order from the root, each node visited once.
    pub(crate) fn breadth_first(&self) -> Vec<Visit> {
        let Some(root) = self.root.filter(|&root| self.contains(root)) else {
            return Vec::new();
        };
        let children = self.adjacency();
        let mut seen = HashSet::from([root]);
        let mut order = Vec::new();
        let mut queue = VecDeque::from([Visit {
            id: root,
            level: 0,
            parent: None,
        }]);
        while let Some(visit) = queue.pop_front() {
            for &child in children.get(&visit.id).into_iter().flatten() {
                if seen.insert(child) {
                    queue.push_back(Visit {
                        id: child,
                        level: visit.level.saturating_add(1),
                        parent: Some(visit.id),
                    });
                }
            }
            order.push(visit);
        }
        order
    }

    /// Recomputes every reachable node's `count` as the number of records
    /// attached at member-holding nodes in its subtree.
    pub(crate) fn recount(&mut self) {
        let own: HashMap<NodeId, usize> = self
            .nodes
            .iter()
            .map(|node| {
                let attached = if node.kind.counts_members() {
                    node.employees.len()
                } else {
                    0
                };
                (node.id, attached)
            })
            .collect();
        let mut totals: HashMap<NodeId, usize> = HashMap::with_capacity(own.len());
        for visit in self.breadth_first().iter().rev() {
            let below = totals.get(&visit.id).copied().unwrap_or(0);
            let total = below.saturating_add(own.get(&visit.id).copied().unwrap_or(0));
            totals.insert(visit.id, total);
            if let Some(parent) = visit.parent {
                let sum = totals.entry(parent).or_insert(0);
                *sum = sum.saturating_add(total);
            }
        }
        for node in &mut self.nodes {
            if let Some(&total) = totals.get(&node.id) {
                node.count = total;
            }
        }
    }
}

/// One step of a breadth-first walk from the root.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Visit {
    pub(crate) id: NodeId,
    pub(crate) level: usize,
    pub(crate) parent: Option<NodeId>,
}

#[cfg(test)]
mod tests;
