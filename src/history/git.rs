use anyhow::{Context, Result};
use git2::{
    Commit, Delta, Diff, DiffDelta, DiffFile, DiffFindOptions, DiffOptions, ErrorCode, Patch,
    Repository, Sort,
};
use std::path::Path;
use tracing::debug;

use super::{HistorySource, java};
use crate::model::{ChangeEvent, ChangeKind, ChangedMethod, CommitRecord};
use crate::util::SourceFilter;

/// Commit history of a git repository, restricted to the filter's extension.
///
/// Commits that touch no file with the extension are skipped and do not
/// count towards the traversal bound. Merge commits carry no changes, so
/// they are always skipped.
pub struct GitHistory {
    repo: Repository,
    filter: SourceFilter,
}

impl GitHistory {
    /// Open the repository at `path` (not a subdirectory of it)
    pub fn open(path: &Path, filter: &SourceFilter) -> Result<Self> {
        let repo = Repository::open(path)
            .with_context(|| format!("Failed to open git repository at {}", path.display()))?;
        debug!("Opened git repository at {:?}", repo.path());
        Ok(Self {
            repo,
            filter: filter.clone(),
        })
    }

    fn touches_extension(&self, event: &ChangeEvent) -> bool {
        [&event.old_path, &event.new_path]
            .into_iter()
            .flatten()
            .any(|p| self.filter.has_extension(p))
    }

    /// Classify every file the commit changed relative to its first parent
    fn commit_changes(&self, commit: &Commit) -> Result<Vec<ChangeEvent>> {
        if commit.parent_count() > 1 {
            return Ok(Vec::new());
        }

        let tree = commit.tree()?;
        let parent_tree = match commit.parent_count() {
            0 => None,
            _ => Some(commit.parent(0)?.tree()?),
        };

        let mut diff_opts = DiffOptions::new();
        diff_opts.ignore_filemode(true);
        let mut diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut diff_opts))?;

        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        let mut events = Vec::new();
        for (idx, delta) in diff.deltas().enumerate() {
            let kind = match delta.status() {
                Delta::Added | Delta::Copied => ChangeKind::Add,
                Delta::Deleted => ChangeKind::Delete,
                Delta::Modified | Delta::Typechange => ChangeKind::Modify,
                Delta::Renamed => ChangeKind::Rename,
                _ => continue,
            };

            let old_path = match kind {
                ChangeKind::Add => None,
                _ => file_path(&delta.old_file()),
            };
            let new_path = match kind {
                ChangeKind::Delete => None,
                _ => file_path(&delta.new_file()),
            };

            let mut event = ChangeEvent {
                kind,
                old_path,
                new_path,
                methods: Vec::new(),
            };
            if self.touches_extension(&event) {
                event.methods = self.changed_methods(&diff, idx, &delta)?;
            }
            events.push(event);
        }

        Ok(events)
    }

    fn changed_methods(
        &self,
        diff: &Diff<'_>,
        idx: usize,
        delta: &DiffDelta<'_>,
    ) -> Result<Vec<ChangedMethod>> {
        let Some(patch) = Patch::from_diff(diff, idx)? else {
            return Ok(Vec::new());
        };

        let mut added = Vec::new();
        let mut deleted = Vec::new();
        for hunk in 0..patch.num_hunks() {
            for line_idx in 0..patch.num_lines_in_hunk(hunk)? {
                let line = patch.line_in_hunk(hunk, line_idx)?;
                match line.origin() {
                    '+' => added.extend(line.new_lineno().map(|n| n as usize)),
                    '-' => deleted.extend(line.old_lineno().map(|n| n as usize)),
                    _ => {}
                }
            }
        }

        if added.is_empty() && deleted.is_empty() {
            return Ok(Vec::new());
        }

        let before = self.blob_text(&delta.old_file())?;
        let after = self.blob_text(&delta.new_file())?;
        java::changed_methods(before.as_deref(), after.as_deref(), &added, &deleted)
    }

    fn blob_text(&self, file: &DiffFile<'_>) -> Result<Option<String>> {
        if file.id().is_zero() {
            return Ok(None);
        }
        let blob = self
            .repo
            .find_blob(file.id())
            .with_context(|| format!("Failed to read blob {}", file.id()))?;
        if blob.is_binary() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(blob.content()).into_owned()))
    }
}

impl HistorySource for GitHistory {
    fn traverse(
        &self,
        max_commits: usize,
        visit: &mut dyn FnMut(CommitRecord) -> Result<()>,
    ) -> Result<usize> {
        match self.repo.head() {
            Ok(_) => {}
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                debug!("Repository has no HEAD, nothing to traverse");
                return Ok(0);
            }
            Err(e) => return Err(e).context("Failed to resolve HEAD"),
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE)?;
        revwalk.push_head()?;

        let mut visited = 0;
        for oid in revwalk {
            if visited >= max_commits {
                break;
            }
            let commit = self.repo.find_commit(oid?)?;
            let changes = self.commit_changes(&commit)?;

            if !changes.iter().any(|e| self.touches_extension(e)) {
                continue;
            }

            visit(CommitRecord::new(commit.id().to_string(), changes))?;
            visited += 1;
        }

        Ok(visited)
    }
}

fn file_path(file: &DiffFile<'_>) -> Option<String> {
    file.path().map(|p| p.to_string_lossy().into_owned())
}
