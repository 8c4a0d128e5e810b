//! Node emission shared by both assembly modes.

use std::collections::HashMap;

use crate::{
    graph::{HierarchyGraph, NodeDraft, NodeId, NodeKind},
    grouping::{group_by_job_role, group_by_location},
    name::NormalizedName,
    record::EmployeeRecord,
};

/// Where a run of location and role groups hangs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum GroupParent {
    /// Directly under the department root, for employees without a manager.
    TopLevel(NodeId),
    /// Under a manager node.
    Manager(NodeId),
}

impl GroupParent {
    const fn node(self) -> NodeId {
        match self {
            Self::TopLevel(id) | Self::Manager(id) => id,
        }
    }

    const fn manager_id(self) -> Option<NodeId> {
        match self {
            Self::TopLevel(_) => None,
            Self::Manager(id) => Some(id),
        }
    }

    const fn role_kind(self) -> NodeKind {
        match self {
            Self::TopLevel(_) => NodeKind::TopLevelRole,
            Self::Manager(_) => NodeKind::JobRole,
        }
    }
}

/// A freshly emitted job-role node and the records attached to it.
pub(super) struct RoleGroup<'r> {
    pub(super) node: NodeId,
    pub(super) members: Vec<&'r EmployeeRecord>,
}

/// One assembly run: a fresh graph whose id counter starts at 0, plus the
/// manager nodes materialized so far.
#[derive(Debug, Default)]
pub(super) struct Assembly {
    graph: HierarchyGraph,
    managers: HashMap<NormalizedName, NodeId>,
}

impl Assembly {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn department_root(&mut self, department: &str, employees: usize) -> NodeId {
        let name = format!("{department} Department");
        self.graph.insert(
            NodeKind::Department,
            NodeDraft {
                label: name.clone(),
                name,
                count: employees,
                ..NodeDraft::default()
            },
        )
    }

    /// Emits a person node. Manager nodes are registered under their
    /// normalized name so later passes can attach beneath them.
    pub(super) fn person(&mut self, record: &EmployeeRecord, kind: NodeKind) -> NodeId {
        let id = self.graph.insert(
            kind,
            NodeDraft {
                name: record.display_name().to_owned(),
                label: record.person_label(),
                employees: vec![record.clone()],
                ..NodeDraft::default()
            },
        );
        if kind == NodeKind::Manager {
            self.managers.insert(record.normalized_name(), id);
        }
        id
    }

    pub(super) fn manager_node(&self, key: &NormalizedName) -> Option<NodeId> {
        self.managers.get(key).copied()
    }

    pub(super) fn link(&mut self, parent: NodeId, child: NodeId) {
        self.graph.link(parent, child);
    }

    pub(super) fn set_root(&mut self, root: Option<NodeId>) {
        self.graph.set_root(root);
    }

    /// Groups `members` by location, then by display job role, emitting a
    /// location node per location and a role node per role beneath it.
    pub(super) fn emit_groups<'r, I>(&mut self, parent: GroupParent, members: I) -> Vec<RoleGroup<'r>>
    where
        I: IntoIterator<Item = &'r EmployeeRecord>,
    {
        let mut roles = Vec::new();
        for location in group_by_location(members) {
            let location_label = match parent {
                GroupParent::TopLevel(_) => format!("{} (Top Level)", location.key),
                GroupParent::Manager(_) => {
                    format!("{} ({} employees)", location.key, location.members.len())
                }
            };
            let location_node = self.graph.insert(
                NodeKind::Location,
                NodeDraft {
                    name: location.key,
                    label: location_label,
                    count: location.members.len(),
                    manager_id: parent.manager_id(),
                    ..NodeDraft::default()
                },
            );
            self.graph.link(parent.node(), location_node);
            for role in group_by_job_role(location.members) {
                let role_label = match parent {
                    GroupParent::TopLevel(_) => format!("{} (Top Level)", role.key),
                    GroupParent::Manager(_) => {
                        format!("{} ({} employees)", role.key, role.members.len())
                    }
                };
                let role_node = self.graph.insert(
                    parent.role_kind(),
                    NodeDraft {
                        name: role.key,
                        label: role_label,
                        count: role.members.len(),
                        employees: role.members.iter().map(|&record| record.clone()).collect(),
                        manager_id: parent.manager_id(),
                        ..NodeDraft::default()
                    },
                );
                self.graph.link(location_node, role_node);
                roles.push(RoleGroup {
                    node: role_node,
                    members: role.members,
                });
            }
        }
        roles
    }

    /// Finalizes subtree counts and hands over the graph.
    pub(super) fn finish(mut self) -> HierarchyGraph {
        self.graph.recount();
        self.graph
    }
}
