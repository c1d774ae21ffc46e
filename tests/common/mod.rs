// Shared test fixtures for integration tests
// Functions here are used across different test files
#![allow(dead_code)]

use git2::{Repository, Signature};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CALC_V1: &str = "package demo;

public class Calc {
    public int add(int a, int b) {
        return a + b;
    }

    public int sub(int a, int b) {
        return a - b;
    }
}
";

/// CALC_V1 with only the body of `sub` changed (line 9)
pub const CALC_V2: &str = "package demo;

public class Calc {
    public int add(int a, int b) {
        return a + b;
    }

    public int sub(int a, int b) {
        return -(b - a);
    }
}
";

pub const CALC_ADD: &str = "demo.Calc::add(int, int)";
pub const CALC_SUB: &str = "demo.Calc::sub(int, int)";

/// Create a temporary git repository
pub fn create_test_repo() -> (TempDir, PathBuf, Repository) {
    let dir = TempDir::new().unwrap();
    let repo_path = dir.path().to_path_buf();
    let repo = Repository::init(&repo_path).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    (dir, repo_path, repo)
}

/// Create a repository nested under `parent`, as found in a dataset
pub fn create_repo_in(parent: &Path, name: &str) -> Repository {
    let repo_path = parent.join(name);
    std::fs::create_dir_all(&repo_path).unwrap();
    Repository::init(&repo_path).unwrap()
}

fn commit_index(repo: &Repository, message: &str) -> git2::Oid {
    commit_index_with(repo, message, &[])
}

/// Commit the index on top of HEAD plus any `extra_parents`
fn commit_index_with(repo: &Repository, message: &str, extra_parents: &[git2::Oid]) -> git2::Oid {
    let sig = Signature::now("Test User", "test@example.com").unwrap();
    let mut index = repo.index().unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let mut parents: Vec<git2::Commit> = repo
        .head()
        .ok()
        .and_then(|h| h.peel_to_commit().ok())
        .into_iter()
        .collect();
    for oid in extra_parents {
        parents.push(repo.find_commit(*oid).unwrap());
    }
    let parents: Vec<&git2::Commit> = parents.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

fn stage_file(repo: &Repository, index: &mut git2::Index, path: &str, content: &[u8]) {
    let full_path = repo.workdir().unwrap().join(path);
    if let Some(parent) = full_path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&full_path, content).unwrap();
    index.add_path(Path::new(path)).unwrap();
}

/// Write files to the working directory, stage them and commit
pub fn add_commit(repo: &Repository, files: &[(&str, &str)], message: &str) -> git2::Oid {
    let mut index = repo.index().unwrap();
    for (path, content) in files {
        stage_file(repo, &mut index, path, content.as_bytes());
    }
    index.write().unwrap();
    commit_index(repo, message)
}

/// Commit a single file with raw (possibly non-UTF-8) content
pub fn add_bytes_commit(repo: &Repository, path: &str, content: &[u8], message: &str) -> git2::Oid {
    let mut index = repo.index().unwrap();
    stage_file(repo, &mut index, path, content);
    index.write().unwrap();
    commit_index(repo, message)
}

/// Commit a top-level file on a branch off `parent`, leaving HEAD alone
pub fn side_commit(
    repo: &Repository,
    parent: git2::Oid,
    path: &str,
    content: &str,
    message: &str,
) -> git2::Oid {
    let sig = Signature::now("Test User", "test@example.com").unwrap();
    let parent = repo.find_commit(parent).unwrap();
    let mut builder = repo.treebuilder(Some(&parent.tree().unwrap())).unwrap();
    let blob = repo.blob(content.as_bytes()).unwrap();
    builder.insert(path, blob, 0o100644).unwrap();
    let tree = repo.find_tree(builder.write().unwrap()).unwrap();
    repo.commit(None, &sig, &sig, message, &tree, &[&parent])
        .unwrap()
}

/// Merge `other` into HEAD; `files` is what the merge result adds on top of HEAD
pub fn merge_commit(
    repo: &Repository,
    other: git2::Oid,
    files: &[(&str, &str)],
    message: &str,
) -> git2::Oid {
    let mut index = repo.index().unwrap();
    for (path, content) in files {
        stage_file(repo, &mut index, path, content.as_bytes());
    }
    index.write().unwrap();
    commit_index_with(repo, message, &[other])
}

/// Remove a file from the repository and commit
pub fn remove_file_commit(repo: &Repository, path: &str, message: &str) -> git2::Oid {
    let full_path = repo.workdir().unwrap().join(path);
    if full_path.exists() {
        std::fs::remove_file(&full_path).unwrap();
    }
    let mut index = repo.index().unwrap();
    index.remove_path(Path::new(path)).unwrap();
    index.write().unwrap();
    commit_index(repo, message)
}

/// Move a file without changing its content and commit
pub fn rename_file_commit(repo: &Repository, from: &str, to: &str, message: &str) -> git2::Oid {
    let workdir = repo.workdir().unwrap();
    let target = workdir.join(to);
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::rename(workdir.join(from), &target).unwrap();

    let mut index = repo.index().unwrap();
    index.remove_path(Path::new(from)).unwrap();
    index.add_path(Path::new(to)).unwrap();
    index.write().unwrap();
    commit_index(repo, message)
}
