//! Transaction extraction (second pass)
//!
//! Rebuilds method keys exactly as the first pass did and turns each commit
//! into at most one transaction of resolved method ids.

use anyhow::Result;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::history::HistorySource;
use crate::model::{CommitDetails, CommitRecord, CommitTransaction, MethodKey, TransactionDatabase};
use crate::util::SourceFilter;

use super::identity::IdentityMap;
use super::progress::{Pass, ProgressReporter};

/// Build the transaction database for up to `max_commits` commits.
///
/// Commits without a resolved method are dropped, as are records equal to
/// one already collected.
pub fn build_transactions(
    history: &dyn HistorySource,
    max_commits: usize,
    filter: &SourceFilter,
    identities: &IdentityMap,
    progress: &dyn ProgressReporter,
) -> Result<TransactionDatabase> {
    let mut database = TransactionDatabase::new();
    // commit hash -> positions in `database`, for structural dedup
    let mut by_hash: FxHashMap<String, Vec<usize>> = FxHashMap::default();
    let pb = progress.begin_pass(Pass::Transactions, max_commits);

    let visited = history.traverse(max_commits, &mut |commit| {
        pb.commit_visited(&commit.hash);
        let Some(tx) = commit_transaction(&commit, filter, identities) else {
            return Ok(());
        };

        let positions = by_hash.entry(tx.commit_hash.clone()).or_default();
        if positions.iter().any(|&i| database[i] == tx) {
            return Ok(());
        }
        positions.push(database.len());
        database.push(tx);
        Ok(())
    })?;
    pb.finish(visited);

    debug!("Collected {} transactions over {} commits", database.len(), visited);
    Ok(database)
}

/// Summarize one commit as a single details block.
///
/// The block keeps the operative path of the last qualifying file, the
/// number of distinct qualifying files with a resolved method, and every
/// resolved id in discovery order. Returns `None` when nothing resolved.
pub fn commit_transaction(
    commit: &CommitRecord,
    filter: &SourceFilter,
    identities: &IdentityMap,
) -> Option<CommitTransaction> {
    let mut methods = Vec::new();
    let mut paths: FxHashSet<&str> = FxHashSet::default();
    let mut last_path = None;

    for event in &commit.changes {
        let path = event.operative_path();
        if !filter.admits(path) {
            continue;
        }
        last_path = Some(path);

        for method in &event.methods {
            let key = MethodKey::new(path, &method.long_name);
            match identities.resolve(&key) {
                Some(id) => {
                    methods.push(id.clone());
                    paths.insert(path);
                }
                None => warn!(commit = %commit.hash, "Key not found in key-to-method ID mappings: {}", key),
            }
        }
    }

    if methods.is_empty() {
        return None;
    }

    let details = CommitDetails {
        path: last_path?.to_string(),
        affected_files: paths.len(),
        methods,
        transaction_frequency: None,
    };
    Some(CommitTransaction::new(commit.hash.clone(), details))
}
