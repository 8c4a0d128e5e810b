//! Org-hierarchy reconstruction from flat employee rosters.
//!
//! Records name their reporting manager in free text. This crate normalizes
//! and fuzzily matches those names, groups employees under their managers,
//! and assembles a typed node/edge graph either for a whole department or
//! for a single manager's reporting chain. [`OrgSession`] threads the roster,
//! the generated graph and its view overlays between calls.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod graph;
mod grouping;
mod hierarchy;
mod layout;
mod matching;
mod name;
mod record;
mod roster;
mod selection;
mod session;
mod source;
mod stats;
mod structure;
mod telemetry;

#[cfg(test)]
mod test_utils;

pub use crate::{
    error::{OrgError, OrgErrorCode, Result},
    graph::{
        DeleteMode, HierarchyEdge, HierarchyGraph, HierarchyMetrics, HierarchyNode, NewNode,
        NodeId, NodeKind, breadth, depth, measure, node_depth,
    },
    grouping::{
        Group, UNKNOWN_LOCATION, UNKNOWN_ROLE, display_job_role, group_by_job_role,
        group_by_location, location_key,
    },
    hierarchy::{assemble_chain, assemble_chain_with, assemble_department},
    layout::{CanvasSize, LayoutSettings, MIN_CANVAS_EDGE, Position, canvas_size},
    matching::{MATCH_THRESHOLD, find_best_match, similarity},
    name::{NormalizedName, normalize},
    record::{Column, EmployeeRecord, PLACEHOLDER_JOB_PROFILE, PLACEHOLDER_LOCATION},
    roster::{MatchCacheConfig, Resolution, ResolvedManager, RosterIndex},
    selection::Selection,
    session::{
        ColorScope, DatasetRegistry, Generation, ManagerChoice, NamedSnapshot, NodeColors,
        NodeView, OrgSession, PositionOverlay, RegistrySnapshot, RosterGroup, SessionSnapshot,
        ViewOverlay,
    },
    source::RosterSource,
    stats::SummaryStats,
    structure::{ManagerEntry, ManagerStructure},
    telemetry::{ASSEMBLIES_TOTAL, FUZZY_CACHE_HITS_TOTAL, MANAGER_RESOLUTIONS_TOTAL},
};
