//! Serializable session state handed to a persistence collaborator.

use serde::{Deserialize, Serialize};

use super::overlay::{PositionOverlay, ViewOverlay};
use crate::{
    graph::HierarchyGraph, layout::LayoutSettings, record::EmployeeRecord, selection::Selection,
};

/// Everything needed to rebuild an [`super::OrgSession`].
///
/// The snapshot is an opaque blob to its storage; the session never reads
/// or writes storage itself.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// The ingested roster.
    pub roster: Vec<EmployeeRecord>,
    /// Filters of the last successful generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
    /// The edited graph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<HierarchyGraph>,
    /// The graph as assembled, before edits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pristine: Option<HierarchyGraph>,
    /// Manual node positions.
    #[serde(default)]
    pub positions: PositionOverlay,
    /// Expand/hide toggles and custom colours.
    #[serde(default)]
    pub views: ViewOverlay,
    /// Layout parameters.
    #[serde(default)]
    pub layout: LayoutSettings,
}
