//! Named datasets, each carrying its own session state.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{OrgSession, SessionSnapshot};
use crate::{
    error::{OrgError, Result},
    record::EmployeeRecord,
    roster::MatchCacheConfig,
};

/// A stored dataset.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct NamedSnapshot {
    /// Dataset name, trimmed.
    pub name: String,
    /// Session state at the last switch away from the dataset.
    pub snapshot: SessionSnapshot,
}

/// Every dataset plus the one in use, for persistence.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot {
    /// Datasets in creation order.
    pub datasets: Vec<NamedSnapshot>,
    /// Name of the active dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
}

/// Rosters kept under unique names, one of which is active.
///
/// Only the active dataset lives as an [`OrgSession`]; the others are held
/// as snapshots and come back intact, with their selection, graph, overlays
/// and layout, when switched to.
///
/// # Examples
/// ```
/// use orgtree_core::{DatasetRegistry, EmployeeRecord, OrgErrorCode, Selection};
///
/// let mut datasets = DatasetRegistry::new();
/// let q3 = datasets.create("Q3", vec![EmployeeRecord::new("Alice").with_department("X")])?;
/// q3.generate(Selection::new("X"))?;
/// datasets.create("Q4", vec![EmployeeRecord::new("Bob").with_department("Y")])?;
///
/// let duplicate = datasets.create(" Q3 ", Vec::new()).expect_err("name taken");
/// assert_eq!(duplicate.code(), OrgErrorCode::DuplicateDataset);
///
/// let q3 = datasets.switch("Q3")?;
/// assert!(q3.graph().is_some());
/// assert_eq!(datasets.names(), ["Q3", "Q4"]);
/// # Ok::<(), orgtree_core::OrgError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DatasetRegistry {
    stored: Vec<NamedSnapshot>,
    active: Option<Active>,
    match_cache: MatchCacheConfig,
}

#[derive(Clone, Debug)]
struct Active {
    index: usize,
    session: OrgSession,
}

impl DatasetRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `config` for the sessions this registry opens.
    #[must_use]
    pub const fn with_match_cache(mut self, config: MatchCacheConfig) -> Self {
        self.match_cache = config;
        self
    }

    /// Stores `roster` under `name` and makes it the active dataset with a
    /// fresh session and default layout.
    ///
    /// # Errors
    /// Returns [`OrgError::BlankDatasetName`] when `name` is blank and
    /// [`OrgError::DuplicateDataset`] when the trimmed name is taken. The
    /// registry is unchanged on error.
    #[instrument(
        name = "datasets.create",
        err,
        skip(self, roster),
        fields(dataset = name.trim(), records = roster.len()),
    )]
    pub fn create(&mut self, name: &str, roster: Vec<EmployeeRecord>) -> Result<&mut OrgSession> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(OrgError::BlankDatasetName);
        }
        if self.position(trimmed).is_some() {
            return Err(OrgError::DuplicateDataset {
                name: trimmed.to_owned(),
            });
        }
        self.store_active();
        let session = OrgSession::new(roster).with_match_cache(self.match_cache);
        self.stored.push(NamedSnapshot {
            name: trimmed.to_owned(),
            snapshot: session.snapshot(),
        });
        info!(datasets = self.stored.len(), "dataset created");
        let index = self.stored.len().saturating_sub(1);
        Ok(&mut self.active.insert(Active { index, session }).session)
    }

    /// Makes `name` the active dataset, first saving the state of the one
    /// being left. Switching to the active dataset changes nothing.
    ///
    /// # Errors
    /// Returns [`OrgError::UnknownDataset`] when no dataset has the trimmed
    /// name.
    #[instrument(name = "datasets.switch", err, skip(self), fields(dataset = name.trim()))]
    pub fn switch(&mut self, name: &str) -> Result<&mut OrgSession> {
        // Moving `self` keeps the `#[instrument(err)]` closure `FnOnce`, so
        // the returned borrow may escape it.
        let this = self;
        let index = this
            .position(name.trim())
            .ok_or_else(|| OrgError::UnknownDataset {
                name: name.to_owned(),
            })?;
        if this.active.as_ref().is_some_and(|active| active.index == index) {
            return this.current_mut().ok_or_else(|| OrgError::UnknownDataset {
                name: name.to_owned(),
            });
        }
        this.store_active();
        let snapshot = this
            .stored
            .get(index)
            .map(|entry| entry.snapshot.clone())
            .unwrap_or_default();
        let session = OrgSession::restore(snapshot).with_match_cache(this.match_cache);
        Ok(&mut this.active.insert(Active { index, session }).session)
    }

    /// Dataset names in creation order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.stored.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Number of datasets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stored.len()
    }

    /// Whether no dataset has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stored.is_empty()
    }

    /// Name of the active dataset.
    #[must_use]
    pub fn current_name(&self) -> Option<&str> {
        let active = self.active.as_ref()?;
        self.stored.get(active.index).map(|entry| entry.name.as_str())
    }

    /// Session of the active dataset.
    #[must_use]
    pub fn current(&self) -> Option<&OrgSession> {
        self.active.as_ref().map(|active| &active.session)
    }

    /// Mutable session of the active dataset.
    pub fn current_mut(&mut self) -> Option<&mut OrgSession> {
        self.active.as_mut().map(|active| &mut active.session)
    }

    /// Captures every dataset, including the live state of the active one.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        let datasets = self
            .stored
            .iter()
            .enumerate()
            .map(|(index, entry)| match &self.active {
                Some(active) if active.index == index => NamedSnapshot {
                    name: entry.name.clone(),
                    snapshot: active.session.snapshot(),
                },
                _ => entry.clone(),
            })
            .collect();
        RegistrySnapshot {
            datasets,
            current: self.current_name().map(str::to_owned),
        }
    }

    /// Rebuilds a registry, reopening the recorded active dataset when it is
    /// present. Later entries reusing an earlier name are dropped.
    #[must_use]
    pub fn restore(snapshot: RegistrySnapshot) -> Self {
        let mut registry = Self::new();
        for entry in snapshot.datasets {
            let name = entry.name.trim();
            if name.is_empty() || registry.position(name).is_some() {
                continue;
            }
            registry.stored.push(NamedSnapshot {
                name: name.to_owned(),
                snapshot: entry.snapshot,
            });
        }
        registry.active = snapshot
            .current
            .and_then(|current| registry.position(current.trim()))
            .and_then(|index| {
                registry.stored.get(index).map(|entry| Active {
                    index,
                    session: OrgSession::restore(entry.snapshot.clone()),
                })
            });
        registry
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.stored.iter().position(|entry| entry.name == name)
    }

    fn store_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        if let Some(entry) = self.stored.get_mut(active.index) {
            entry.snapshot = active.session.snapshot();
        }
    }
}
