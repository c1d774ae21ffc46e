//! Method identity resolution (first pass)
//!
//! Mints one opaque id per distinct method key seen in the bounded history.

use anyhow::Result;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::debug;

use crate::history::HistorySource;
use crate::model::{MethodId, MethodKey};
use crate::util::SourceFilter;

use super::progress::{Pass, ProgressReporter};

/// Append-only mapping from method key to method id.
///
/// Serializes as a flat JSON object ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityMap {
    ids: FxHashMap<MethodKey, MethodId>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `key`, minting one only if the key is new
    pub fn get_or_mint(&mut self, key: MethodKey) -> &MethodId {
        self.ids.entry(key).or_insert_with(MethodId::mint)
    }

    /// Look up a key; `None` means it was never seen by the first pass
    pub fn resolve(&self, key: &MethodKey) -> Option<&MethodId> {
        self.ids.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MethodKey, &MethodId)> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<(MethodKey, MethodId)> for IdentityMap {
    fn from_iter<T: IntoIterator<Item = (MethodKey, MethodId)>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Serialize for IdentityMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&MethodKey, &MethodId> = self.ids.iter().collect();
        sorted.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for IdentityMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        FxHashMap::deserialize(deserializer).map(|ids| Self { ids })
    }
}

/// Scan up to `max_commits` commits and mint an id for every method key
/// of a qualifying file.
pub fn build_identity_map(
    history: &dyn HistorySource,
    max_commits: usize,
    filter: &SourceFilter,
    progress: &dyn ProgressReporter,
) -> Result<IdentityMap> {
    let mut map = IdentityMap::new();
    let pb = progress.begin_pass(Pass::Identities, max_commits);

    let visited = history.traverse(max_commits, &mut |commit| {
        for event in &commit.changes {
            let path = event.operative_path();
            if !filter.admits(path) {
                continue;
            }
            for method in &event.methods {
                map.get_or_mint(MethodKey::new(path, &method.long_name));
            }
        }
        pb.commit_visited(&commit.hash);
        Ok(())
    })?;
    pb.finish(visited);

    debug!("Resolved {} method keys over {} commits", map.len(), visited);
    Ok(map)
}
