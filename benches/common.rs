// Shared benchmark helpers
// Functions here are used across different benchmark files
#![allow(dead_code)]

use cochange::history::MemoryHistory;
use cochange::mining::IdentityMap;
use cochange::model::{
    ChangeEvent, CommitDetails, CommitRecord, CommitTransaction, MethodId, MethodKey,
    TransactionDatabase,
};

/// Generate a database of `num_transactions` records drawn from `num_classes`
/// distinct co-change sets, with method order rotated per record
pub fn generate_database(num_transactions: usize, num_classes: usize) -> TransactionDatabase {
    (0..num_transactions)
        .map(|i| {
            let class = i % num_classes;
            let mut methods: Vec<MethodId> = (0..(class % 7) + 1)
                .map(|m| MethodId::from(format!("method-{}-{}", class, m).as_str()))
                .collect();
            let len = methods.len();
            methods.rotate_left(i % len);
            CommitTransaction::new(
                format!("commit-{}", i),
                CommitDetails {
                    path: format!("src/File{}.java", class),
                    affected_files: 1,
                    methods,
                    transaction_frequency: None,
                },
            )
        })
        .collect()
}

/// Generate a history touching `files_per_commit` files with 3 methods each
pub fn generate_history(num_commits: usize, files_per_commit: usize) -> MemoryHistory {
    let commits = (0..num_commits)
        .map(|c| {
            let changes = (0..files_per_commit)
                .map(|f| {
                    let n = (c + f) % 500;
                    let path = format!("src/pkg{}/File{}.java", n % 10, n);
                    ChangeEvent::modified(&path, &["A::run()", "A::stop(int)", "A::reset()"])
                })
                .collect();
            CommitRecord::new(format!("commit-{}", c), changes)
        })
        .collect();
    MemoryHistory::new(commits)
}

/// Identity map covering every key `generate_history` can produce
pub fn identities_for(history_files: usize) -> IdentityMap {
    (0..history_files)
        .flat_map(|f| {
            ["A::run()", "A::stop(int)", "A::reset()"].map(|sig| {
                let path = format!("src/pkg{}/File{}.java", f % 10, f);
                (MethodKey::new(&path, sig), MethodId::mint())
            })
        })
        .collect()
}
