//! Session context: the roster, the current hierarchy and its view state.
//!
//! [`OrgSession`] threads everything a viewer needs between calls: the
//! ingested roster, the last selection, the live (editable) graph with a
//! pristine copy for resets, id-keyed overlays and layout settings.
//! [`DatasetRegistry`] keeps several named rosters, each with its own
//! session state.

mod overlay;
mod registry;
mod snapshot;

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{Span, field, info, instrument};

pub use self::{
    overlay::{ColorScope, NodeColors, NodeView, PositionOverlay, ViewOverlay},
    registry::{DatasetRegistry, NamedSnapshot, RegistrySnapshot},
    snapshot::SessionSnapshot,
};
use crate::{
    error::{OrgError, Result},
    graph::{DeleteMode, HierarchyGraph, HierarchyMetrics, NewNode, NodeId, measure},
    grouping::{Group, group_by_job_role, group_by_location},
    hierarchy::{assemble_chain_with, assemble_department},
    layout::{CanvasSize, LayoutSettings, Position, canvas_size},
    record::EmployeeRecord,
    roster::MatchCacheConfig,
    selection::Selection,
    source::RosterSource,
    stats::SummaryStats,
    structure::{ManagerEntry, ManagerStructure},
};

/// Outcome of a successful [`OrgSession::generate`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Generation {
    /// Headline counts.
    pub stats: SummaryStats,
    /// Depth and breadth of the new graph.
    pub metrics: HierarchyMetrics,
}

/// A manager offered for chain selection.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ManagerChoice {
    /// Display name of the manager record.
    pub name: String,
    /// Number of direct reports.
    pub reports: usize,
}

/// An owned run of records sharing a key.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RosterGroup {
    /// Grouping key.
    pub key: String,
    /// Records in first-seen order.
    pub members: Vec<EmployeeRecord>,
}

/// The explicit context replacing process-wide viewer state.
///
/// # Examples
/// ```
/// use orgtree_core::{EmployeeRecord, OrgSession, Selection};
///
/// let roster = vec![
///     EmployeeRecord::new("Alice").with_department("X"),
///     EmployeeRecord::new("Bob").with_department("X").with_reporting_manager("Alice"),
/// ];
/// let mut session = OrgSession::new(roster);
/// assert_eq!(session.departments(), ["X"]);
///
/// let generation = session.generate(Selection::new("X"))?;
/// assert_eq!(generation.stats.total_employees, 2);
/// assert!(session.graph().is_some());
///
/// let missing = session.generate(Selection::new("Y"));
/// assert!(missing.is_err());
/// assert!(session.graph().is_some());
/// # Ok::<(), orgtree_core::OrgError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct OrgSession {
    roster: Vec<EmployeeRecord>,
    selection: Option<Selection>,
    graph: Option<HierarchyGraph>,
    pristine: Option<HierarchyGraph>,
    positions: PositionOverlay,
    views: ViewOverlay,
    layout: LayoutSettings,
    match_cache: MatchCacheConfig,
}

impl OrgSession {
    /// Starts a session over `roster`.
    #[must_use]
    pub fn new(roster: Vec<EmployeeRecord>) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    /// Starts a session over every record of `source`.
    #[must_use]
    pub fn from_source<S: RosterSource + ?Sized>(source: &S) -> Self {
        Self::new(source.records().to_vec())
    }

    /// Uses `config` for fuzzy-match caching during generation.
    #[must_use]
    pub const fn with_match_cache(mut self, config: MatchCacheConfig) -> Self {
        self.match_cache = config;
        self
    }

    /// Starts with `layout` instead of the defaults.
    #[must_use]
    pub const fn with_layout(mut self, layout: LayoutSettings) -> Self {
        self.layout = layout;
        self
    }

    /// Rebuilds a session from a snapshot.
    #[must_use]
    pub fn restore(snapshot: SessionSnapshot) -> Self {
        let SessionSnapshot {
            roster,
            selection,
            mut graph,
            pristine,
            positions,
            views,
            layout,
        } = snapshot;
        if let Some(live) = graph.as_mut() {
            live.reseed_ids();
        }
        Self {
            roster,
            selection,
            graph,
            pristine,
            positions,
            views,
            layout,
            match_cache: MatchCacheConfig::default(),
        }
    }

    /// Captures the session for persistence.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            roster: self.roster.clone(),
            selection: self.selection.clone(),
            graph: self.graph.clone(),
            pristine: self.pristine.clone(),
            positions: self.positions.clone(),
            views: self.views.clone(),
            layout: self.layout,
        }
    }

    /// Swaps in a freshly ingested roster, discarding the hierarchy, the
    /// selection and every overlay. Layout settings persist.
    pub fn replace_roster(&mut self, roster: Vec<EmployeeRecord>) {
        self.roster = roster;
        self.selection = None;
        self.graph = None;
        self.pristine = None;
        self.positions.clear();
        self.views.clear();
    }

    /// The ingested roster.
    #[must_use]
    pub fn roster(&self) -> &[EmployeeRecord] {
        &self.roster
    }

    /// Filters of the last successful generation.
    #[must_use]
    pub const fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// The live, editable graph.
    #[must_use]
    pub const fn graph(&self) -> Option<&HierarchyGraph> {
        self.graph.as_ref()
    }

    /// The graph as last assembled.
    #[must_use]
    pub const fn pristine(&self) -> Option<&HierarchyGraph> {
        self.pristine.as_ref()
    }

    /// Manual node positions.
    #[must_use]
    pub const fn positions(&self) -> &PositionOverlay {
        &self.positions
    }

    /// Per-node view state.
    #[must_use]
    pub const fn views(&self) -> &ViewOverlay {
        &self.views
    }

    /// Current layout settings.
    #[must_use]
    pub const fn layout(&self) -> &LayoutSettings {
        &self.layout
    }

    /// Replaces the layout settings.
    pub const fn set_layout(&mut self, layout: LayoutSettings) {
        self.layout = layout;
    }

    /// Distinct non-blank departments in first-seen order.
    #[must_use]
    pub fn departments(&self) -> Vec<&str> {
        distinct(self.roster.iter().map(|record| record.department.as_str()))
    }

    /// Distinct non-blank locations within `department`, in first-seen order.
    #[must_use]
    pub fn locations(&self, department: &str) -> Vec<&str> {
        distinct(
            self.roster
                .iter()
                .filter(|record| record.department == department)
                .map(|record| record.location.as_str()),
        )
    }

    /// Managers of `department` with their report counts, in structure order.
    #[must_use]
    pub fn managers(&self, department: &str) -> Vec<ManagerChoice> {
        let employees = Selection::new(department).filter(&self.roster);
        self.structure_of(&employees)
            .iter()
            .map(|entry| ManagerChoice {
                name: entry.manager().name.clone(),
                reports: entry.report_count(),
            })
            .collect()
    }

    /// Records passing the department then location filters of `selection`.
    #[must_use]
    pub fn filtered_roster(&self, selection: &Selection) -> Vec<EmployeeRecord> {
        selection.filter(&self.roster)
    }

    /// Managers of the filtered roster grouped by their own location.
    #[must_use]
    pub fn managers_by_location(&self, selection: &Selection) -> Vec<RosterGroup> {
        let employees = selection.filter(&self.roster);
        let structure = self.structure_of(&employees);
        owned_groups(group_by_location(structure.iter().map(ManagerEntry::manager)))
    }

    /// Direct reports of the selection's manager grouped by display job
    /// role, or `None` without a resolvable manager filter.
    #[must_use]
    pub fn direct_reports_by_role(&self, selection: &Selection) -> Option<Vec<RosterGroup>> {
        let employees = selection.filter(&self.roster);
        let structure = self.structure_of(&employees);
        let entry = structure.find(selection.manager()?)?;
        Some(owned_groups(group_by_job_role(entry.reports())))
    }

    /// Assembles the hierarchy for `selection` and makes it current.
    ///
    /// On success the live graph and its pristine copy are replaced and both
    /// overlays are cleared, since node ids are not stable across
    /// assemblies. Layout settings persist. On error nothing changes.
    ///
    /// # Errors
    /// Returns [`OrgError::MissingDepartment`] for a blank department,
    /// [`OrgError::EmptySelection`] when no record passes the filters and
    /// [`OrgError::ManagerNotFound`] when the manager filter names nobody in
    /// the filtered roster's manager structure.
    #[instrument(
        name = "session.generate",
        err,
        skip(self, selection),
        fields(
            department = %selection.department(),
            manager = selection.manager().unwrap_or_default(),
            location = selection.location().unwrap_or_default(),
            mode = field::Empty,
            nodes = field::Empty,
            depth = field::Empty,
            breadth = field::Empty,
        ),
    )]
    pub fn generate(&mut self, selection: Selection) -> Result<Generation> {
        if selection.department().trim().is_empty() {
            return Err(OrgError::MissingDepartment);
        }
        let employees = selection.filter(&self.roster);
        if employees.is_empty() {
            return Err(OrgError::EmptySelection {
                department: selection.department().to_owned(),
                location: selection.location().map(str::to_owned),
            });
        }
        let structure = self.structure_of(&employees);
        let span = Span::current();
        let graph = match selection.manager() {
            Some(manager) => {
                let entry = structure
                    .find(manager)
                    .ok_or_else(|| OrgError::ManagerNotFound {
                        manager: manager.to_owned(),
                        department: selection.department().to_owned(),
                    })?;
                span.record("mode", "chain");
                assemble_chain_with(entry.manager(), &structure, &employees)
            }
            None => {
                span.record("mode", "department");
                assemble_department(selection.department(), &structure, &employees)
            }
        };
        let stats = SummaryStats::compute(&employees, &structure, selection.manager());
        let metrics = measure(&graph);
        span.record("nodes", graph.len());
        span.record("depth", metrics.depth);
        span.record("breadth", metrics.breadth);
        info!(
            employees = stats.total_employees,
            managers = stats.manager_count,
            "hierarchy generated"
        );

        self.pristine = Some(graph.clone());
        self.graph = Some(graph);
        self.positions.clear();
        self.views.clear();
        self.selection = Some(selection);
        Ok(Generation { stats, metrics })
    }

    /// Depth and breadth of the live graph.
    #[must_use]
    pub fn metrics(&self) -> Option<HierarchyMetrics> {
        self.graph.as_ref().map(measure)
    }

    /// Canvas size for the live graph under the current layout.
    #[must_use]
    pub fn canvas_size(&self) -> Option<CanvasSize> {
        self.graph
            .as_ref()
            .map(|graph| canvas_size(graph, &self.layout))
    }

    /// Adds a node to the live graph. Returns `None` when nothing has been
    /// generated yet.
    pub fn add_node(&mut self, node: NewNode) -> Option<NodeId> {
        self.graph.as_mut().map(|graph| graph.add_node(node))
    }

    /// Deletes a node from the live graph and drops overlay entries for
    /// every removed id.
    pub fn delete_node(&mut self, id: NodeId, mode: DeleteMode) -> Vec<NodeId> {
        let Some(graph) = self.graph.as_mut() else {
            return Vec::new();
        };
        let removed = graph.delete_node(id, mode);
        self.positions.forget(&removed);
        self.views.forget(&removed);
        removed
    }

    /// Saves a manual position for `id`.
    pub fn set_position(&mut self, id: NodeId, position: Position) {
        self.positions.set(id, position);
    }

    /// Applies custom colours to `id`, or to every node of the same kind at
    /// the same level below the root. A node the root cannot reach is
    /// painted alone. Returns how many nodes were painted.
    pub fn set_node_colors(&mut self, id: NodeId, colors: &NodeColors, scope: ColorScope) -> usize {
        let Some(graph) = self.graph.as_ref() else {
            return 0;
        };
        let Some(target) = graph.node(id) else {
            return 0;
        };
        let targets: Vec<NodeId> = match scope {
            ColorScope::Node => vec![id],
            ColorScope::Level => {
                let levels: HashMap<NodeId, usize> = graph
                    .breadth_first()
                    .into_iter()
                    .map(|visit| (visit.id, visit.level))
                    .collect();
                match levels.get(&id) {
                    Some(&level) => graph
                        .nodes_of_kind(target.kind)
                        .filter(|node| levels.get(&node.id) == Some(&level))
                        .map(|node| node.id)
                        .collect(),
                    None => vec![id],
                }
            }
        };
        for &node in &targets {
            self.views.entry(node).colors = Some(colors.clone());
        }
        targets.len()
    }

    /// Flips whether `id`'s children are shown and returns the new state.
    pub fn toggle_expanded(&mut self, id: NodeId) -> bool {
        let view = self.views.entry(id);
        view.expanded = !view.expanded;
        view.expanded
    }

    /// Hides or shows `id`.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        self.views.entry(id).hidden = hidden;
    }

    /// Restores the pristine graph, clears every overlay and resets layout
    /// settings. New nodes continue numbering after the largest pristine id.
    pub fn reset_layout(&mut self) {
        self.graph = self.pristine.clone();
        if let Some(graph) = self.graph.as_mut() {
            graph.reseed_ids();
        }
        self.positions.clear();
        self.views.clear();
        self.layout = LayoutSettings::default();
    }

    fn structure_of(&self, employees: &[EmployeeRecord]) -> ManagerStructure {
        ManagerStructure::build_with(employees, self.match_cache)
    }
}

fn owned_groups(groups: Vec<Group<'_>>) -> Vec<RosterGroup> {
    groups
        .into_iter()
        .map(|group| RosterGroup {
            key: group.key,
            members: group.members.into_iter().cloned().collect(),
        })
        .collect()
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values
        .filter(|value| !value.trim().is_empty())
        .filter(|value| seen.insert(*value))
        .collect()
}
