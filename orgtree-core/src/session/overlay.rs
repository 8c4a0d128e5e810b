//! View state kept beside the graph, keyed by node id.
//!
//! Assembly rebuilds nodes wholesale, so manual positions, colours and
//! expand/hide toggles live here instead of on the nodes themselves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{graph::NodeId, layout::Position};

/// Manual node positions.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PositionOverlay(BTreeMap<NodeId, Position>);

impl PositionOverlay {
    /// Position saved for `id`.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<Position> {
        self.0.get(&id).copied()
    }

    /// Saves a position for `id`.
    pub fn set(&mut self, id: NodeId, position: Position) {
        self.0.insert(id, position);
    }

    /// Forgets positions for every id in `ids`.
    pub fn forget(&mut self, ids: &[NodeId]) {
        for id in ids {
            self.0.remove(id);
        }
    }

    /// Number of saved positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no positions are saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Position)> + '_ {
        self.0.iter().map(|(&id, &position)| (id, position))
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

/// Custom colours of one node. Unset channels fall back to the theme.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NodeColors {
    /// Fill colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Border colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Text colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Which nodes a colour change applies to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ColorScope {
    /// Only the chosen node.
    #[default]
    Node,
    /// Every node of the same kind at the same depth.
    Level,
}

/// View toggles and colours of one node.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NodeView {
    /// Whether the node's children are shown.
    pub expanded: bool,
    /// Whether the node itself is hidden.
    pub hidden: bool,
    /// Custom colours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<NodeColors>,
}

impl Default for NodeView {
    fn default() -> Self {
        Self {
            expanded: true,
            hidden: false,
            colors: None,
        }
    }
}

/// Per-node view state. Nodes without an entry use [`NodeView::default`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViewOverlay(BTreeMap<NodeId, NodeView>);

impl ViewOverlay {
    /// View state of `id`.
    #[must_use]
    pub fn get(&self, id: NodeId) -> NodeView {
        self.0.get(&id).cloned().unwrap_or_default()
    }

    /// Mutable view state of `id`, created on first use.
    pub fn entry(&mut self, id: NodeId) -> &mut NodeView {
        self.0.entry(id).or_default()
    }

    /// Forgets view state for every id in `ids`.
    pub fn forget(&mut self, ids: &[NodeId]) {
        for id in ids {
            self.0.remove(id);
        }
    }

    /// Number of nodes with non-default state recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}
