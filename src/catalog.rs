//! Region catalog: valid keys, display labels, hierarchy membership.
//!
//! The catalog is the lookup layer between user-facing region identifiers
//! and their raw series stores. Content comes from the ingested tables at
//! startup (nation, then states, then counties under their state) rather
//! than from hard-coded option lists, and is immutable after load.
//!
//! Key grammar at the boundary:
//!
//! - nation: the literal `US`
//! - state: the state's proper name (`New Hampshire`)
//! - county: `<CountyName>-<StateName>` (`Rockingham-New Hampshire`);
//!   county-equivalents whose name contains `city` keep it verbatim in the
//!   key, while the display label drops the suffix

use std::collections::HashMap;

use crate::domain::RegionLevel;
use crate::error::{Result, TrendsError};
use crate::store::RegionStore;

/// One registered region.
#[derive(Debug)]
pub struct RegionEntry {
    pub key: String,
    pub label: String,
    pub level: RegionLevel,
    parent: Option<usize>,
    store: RegionStore,
}

impl RegionEntry {
    pub fn store(&self) -> &RegionStore {
        &self.store
    }
}

/// Immutable-after-load map from region key to its series store.
#[derive(Debug, Default)]
pub struct RegionCatalog {
    entries: Vec<RegionEntry>,
    index: HashMap<String, usize>,
}

impl RegionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a region and take ownership of its store.
    ///
    /// Fails with `DuplicateRegion` on key collision. A county requires its
    /// parent state to already be registered, `UnknownParent` otherwise.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        level: RegionLevel,
        parent_key: Option<&str>,
        store: RegionStore,
    ) -> Result<()> {
        let key = key.into();
        if self.index.contains_key(&key) {
            return Err(TrendsError::DuplicateRegion(key));
        }

        let parent = match (level, parent_key) {
            (RegionLevel::County, None) => {
                return Err(TrendsError::UnknownParent {
                    key,
                    parent: "(none)".to_string(),
                });
            }
            (_, None) => None,
            (_, Some(parent_key)) => {
                let Some(&idx) = self.index.get(parent_key) else {
                    return Err(TrendsError::UnknownParent {
                        key,
                        parent: parent_key.to_string(),
                    });
                };
                if level == RegionLevel::County
                    && self.entries[idx].level != RegionLevel::State
                {
                    return Err(TrendsError::UnknownParent {
                        key,
                        parent: parent_key.to_string(),
                    });
                }
                Some(idx)
            }
        };

        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(RegionEntry {
            key,
            label: label.into(),
            level,
            parent,
            store,
        });
        Ok(())
    }

    /// Resolve a key to its raw series store.
    pub fn resolve(&self, key: &str) -> Result<&RegionStore> {
        self.entry(key).map(RegionEntry::store)
    }

    /// Resolve a key to its full catalog entry.
    pub fn entry(&self, key: &str) -> Result<&RegionEntry> {
        self.index
            .get(key)
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| TrendsError::UnknownRegion(key.to_string()))
    }

    /// The parent entry of a region, if it has one.
    pub fn parent_of(&self, entry: &RegionEntry) -> Option<&RegionEntry> {
        entry.parent.map(|idx| &self.entries[idx])
    }

    /// All `(key, label)` pairs in registration order.
    ///
    /// Restartable: each call returns a fresh iterator for the presentation
    /// layer to turn into a selector.
    pub fn list_selectable(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.label.as_str()))
    }

    /// All entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegionEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Composite key for a county region: `<CountyName>-<StateName>`.
///
/// County-equivalents (names containing `city`) are kept verbatim.
pub fn county_key(county: &str, state: &str) -> String {
    format!("{county}-{state}")
}

/// Human-readable label for a county region: `County, State`, with the
/// ` city` suffix of county-equivalents dropped for display only.
pub fn county_label(county: &str, state: &str) -> String {
    let display = county.strip_suffix(" city").unwrap_or(county);
    format!("{display}, {state}")
}
