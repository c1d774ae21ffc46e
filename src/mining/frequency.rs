//! Transaction frequency annotation
//!
//! Transactions are grouped by their co-change signature: the set of method
//! ids in a details block, ignoring order and repeats. A block's frequency is
//! one plus the number of blocks in other commits with the same signature,
//! which is the class size when commit hashes are unique.

use rustc_hash::FxHashMap;

use crate::model::{CommitDetails, TransactionDatabase};

/// Canonical, order-independent form of a block's method ids
fn signature(details: &CommitDetails) -> Vec<&str> {
    let mut ids: Vec<&str> = details.methods.iter().map(|m| m.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Compute `transaction_frequency` for every details block.
///
/// Returns true if any block's frequency changed.
pub fn annotate_frequencies(database: &mut TransactionDatabase) -> bool {
    let frequencies: Vec<Vec<usize>> = {
        let mut class_sizes: FxHashMap<Vec<&str>, usize> = FxHashMap::default();
        let mut per_commit: FxHashMap<(Vec<&str>, &str), usize> = FxHashMap::default();

        for tx in database.iter() {
            for details in &tx.commit_details {
                let sig = signature(details);
                *per_commit.entry((sig.clone(), tx.commit_hash.as_str())).or_default() += 1;
                *class_sizes.entry(sig).or_default() += 1;
            }
        }

        database
            .iter()
            .map(|tx| {
                tx.commit_details
                    .iter()
                    .map(|details| {
                        let sig = signature(details);
                        let same_commit = per_commit[&(sig.clone(), tx.commit_hash.as_str())];
                        1 + class_sizes[&sig] - same_commit
                    })
                    .collect()
            })
            .collect()
    };

    let mut changed = false;
    for (tx, freqs) in database.iter_mut().zip(frequencies) {
        for (details, freq) in tx.commit_details.iter_mut().zip(freqs) {
            if details.transaction_frequency != Some(freq) {
                details.transaction_frequency = Some(freq);
                changed = true;
            }
        }
    }
    changed
}
