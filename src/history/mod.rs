//! Commit history sources
//!
//! The mining passes only see [`CommitRecord`]s; where they come from is
//! behind [`HistorySource`] so the passes can run against a real repository
//! or a scripted history.
//!
//! - **git**: libgit2 traversal with per-file change classification
//! - **java**: changed-method detection over pre/post images

mod git;
pub mod java;

pub use git::GitHistory;

use anyhow::Result;

use crate::model::CommitRecord;

/// A bounded, ordered source of commits.
///
/// Implementations must yield the same prefix of history on every call so
/// that keys rebuilt in the second pass match those minted in the first.
pub trait HistorySource {
    /// Feed up to `max_commits` commits to `visit`, oldest first.
    ///
    /// Returns the number of commits visited. An error from `visit` stops
    /// the traversal and is returned as is.
    fn traverse(
        &self,
        max_commits: usize,
        visit: &mut dyn FnMut(CommitRecord) -> Result<()>,
    ) -> Result<usize>;
}

/// History held in memory, replayed verbatim
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    commits: Vec<CommitRecord>,
}

impl MemoryHistory {
    pub fn new(commits: Vec<CommitRecord>) -> Self {
        Self { commits }
    }
}

impl HistorySource for MemoryHistory {
    fn traverse(
        &self,
        max_commits: usize,
        visit: &mut dyn FnMut(CommitRecord) -> Result<()>,
    ) -> Result<usize> {
        let mut visited = 0;
        for commit in self.commits.iter().take(max_commits) {
            visit(commit.clone())?;
            visited += 1;
        }
        Ok(visited)
    }
}
