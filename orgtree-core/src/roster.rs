//! Reporting-manager resolution against a roster.
//!
//! [`RosterIndex`] answers "who is this manager name?" with an exact lookup
//! by [`NormalizedName`], a fuzzy scan of the roster, and finally a
//! synthesized placeholder that is registered so later references to the
//! same name reuse it.

use std::{collections::HashMap, num::NonZeroUsize};

use lru::LruCache;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    matching::best_match_index, name::NormalizedName, record::EmployeeRecord, telemetry,
};

/// How a reporting-manager name was resolved.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// The normalized name matched a roster row.
    Exact,
    /// A roster row scored above the fuzzy-match threshold.
    Fuzzy,
    /// Nothing resolved and a stand-in record was synthesized or reused.
    Placeholder,
}

impl Resolution {
    /// Returns the stable label used in logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
            Self::Placeholder => "placeholder",
        }
    }
}

/// A reporting-manager name resolved to a concrete record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedManager {
    /// Lookup key of the resolved record's own name.
    pub key: NormalizedName,
    /// The roster row or placeholder standing for the manager.
    pub record: EmployeeRecord,
    /// Which resolution step produced the record.
    pub resolution: Resolution,
}

/// Sizing for the fuzzy-match memo kept by [`RosterIndex`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MatchCacheConfig {
    capacity: NonZeroUsize,
}

impl MatchCacheConfig {
    /// Number of distinct manager names remembered by default.
    pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(4096) {
        Some(capacity) => capacity,
        None => NonZeroUsize::MIN,
    };

    /// Creates a configuration remembering up to `capacity` names.
    #[must_use]
    pub const fn new(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }

    /// Returns the configured capacity.
    #[must_use]
    pub const fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

impl Default for MatchCacheConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Slot {
    Roster(usize),
    Placeholder(usize),
}

/// Lookup structure over one roster snapshot.
///
/// Duplicate normalized names collide: the last roster row wins.
///
/// # Examples
/// ```
/// use orgtree_core::{EmployeeRecord, Resolution, RosterIndex};
///
/// let roster = vec![EmployeeRecord::new("Alice Jones")];
/// let mut index = RosterIndex::new(&roster);
///
/// let exact = index.resolve("jones, alice", "X").expect("resolves");
/// assert_eq!(exact.resolution, Resolution::Exact);
///
/// let missing = index.resolve("Zed", "X").expect("placeholder");
/// assert_eq!(missing.resolution, Resolution::Placeholder);
/// assert_eq!(missing.record.department, "X");
/// ```
#[derive(Debug)]
pub struct RosterIndex<'a> {
    roster: &'a [EmployeeRecord],
    lookup: HashMap<NormalizedName, Slot>,
    placeholders: Vec<EmployeeRecord>,
    fuzzy: LruCache<NormalizedName, Option<usize>>,
    cache_hits: u64,
}

impl<'a> RosterIndex<'a> {
    /// Indexes `roster` with the default cache configuration.
    #[must_use]
    pub fn new(roster: &'a [EmployeeRecord]) -> Self {
        Self::with_cache_config(roster, MatchCacheConfig::default())
    }

    /// Indexes `roster`, remembering fuzzy results per `config`.
    #[must_use]
    pub fn with_cache_config(roster: &'a [EmployeeRecord], config: MatchCacheConfig) -> Self {
        let lookup = roster
            .iter()
            .enumerate()
            .map(|(index, record)| (record.normalized_name(), Slot::Roster(index)))
            .collect();
        Self {
            roster,
            lookup,
            placeholders: Vec::new(),
            fuzzy: LruCache::new(config.capacity()),
            cache_hits: 0,
        }
    }

    /// Returns the roster row registered under `key`, ignoring placeholders.
    #[must_use]
    pub fn roster_record(&self, key: &NormalizedName) -> Option<&'a EmployeeRecord> {
        match self.lookup.get(key) {
            Some(Slot::Roster(index)) => self.roster.get(*index),
            Some(Slot::Placeholder(_)) | None => None,
        }
    }

    /// Returns whether `key` names a roster row.
    #[must_use]
    pub fn contains(&self, key: &NormalizedName) -> bool {
        self.roster_record(key).is_some()
    }

    /// Number of placeholders synthesized so far.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }

    /// Number of fuzzy lookups answered from the cache.
    #[must_use]
    pub const fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    /// Resolves a reporting-manager name.
    ///
    /// Returns `None` only for a blank name. Unresolvable names produce a
    /// placeholder whose department is `department`, registered so later
    /// calls for the same normalized name return it again.
    pub fn resolve(&mut self, manager_name: &str, department: &str) -> Option<ResolvedManager> {
        let trimmed = manager_name.trim();
        if trimmed.is_empty() {
            return None;
        }
        let key = NormalizedName::new(trimmed);
        let resolved = match self.lookup.get(&key).copied() {
            Some(Slot::Roster(index)) => self.from_roster(index, Resolution::Exact),
            Some(Slot::Placeholder(index)) => self.placeholders.get(index).map(|record| {
                ResolvedManager {
                    key: key.clone(),
                    record: record.clone(),
                    resolution: Resolution::Placeholder,
                }
            }),
            None => None,
        };
        let resolved = match resolved {
            Some(found) => found,
            None => {
                let fuzzy = self
                    .fuzzy_index(&key)
                    .and_then(|index| self.from_roster(index, Resolution::Fuzzy));
                match fuzzy {
                    Some(found) => {
                        debug!(manager = trimmed, matched = %found.record.name, "fuzzy manager match");
                        found
                    }
                    None => self.register_placeholder(key, trimmed, department),
                }
            }
        };
        telemetry::record_resolution(resolved.resolution);
        Some(resolved)
    }

    fn from_roster(&self, index: usize, resolution: Resolution) -> Option<ResolvedManager> {
        self.roster.get(index).map(|record| ResolvedManager {
            key: record.normalized_name(),
            record: record.clone(),
            resolution,
        })
    }

    fn fuzzy_index(&mut self, key: &NormalizedName) -> Option<usize> {
        if let Some(&cached) = self.fuzzy.get(key) {
            self.cache_hits = self.cache_hits.saturating_add(1);
            telemetry::record_cache_hit();
            return cached;
        }
        let found = best_match_index(key, self.roster);
        self.fuzzy.put(key.clone(), found);
        found
    }

    fn register_placeholder(
        &mut self,
        key: NormalizedName,
        name: &str,
        department: &str,
    ) -> ResolvedManager {
        debug!(manager = name, department, "synthesized placeholder manager");
        let record = EmployeeRecord::placeholder(name, department);
        self.lookup
            .insert(key.clone(), Slot::Placeholder(self.placeholders.len()));
        self.placeholders.push(record.clone());
        ResolvedManager {
            key,
            record,
            resolution: Resolution::Placeholder,
        }
    }
}
