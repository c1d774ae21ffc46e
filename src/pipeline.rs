//! Per-repository orchestration of the mining stages
//!
//! Each stage is skipped when its artifact already exists, so an
//! interrupted dataset run resumes at the first missing artifact.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::history::{GitHistory, HistorySource};
use crate::mining::{ProgressReporter, annotate_frequencies, build_identity_map, build_transactions};
use crate::store::ArtifactStore;
use crate::util::current_timestamp;

/// A repository found under the dataset root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    pub name: String,
    pub path: PathBuf,
}

/// List the immediate subdirectories of `root`, sorted by name
pub fn discover_repositories(root: &Path) -> Result<Vec<RepositoryTarget>> {
    if !root.exists() {
        return Err(PipelineError::DatasetNotFound(root.to_path_buf()).into());
    }

    let mut targets = Vec::new();
    let entries = fs::read_dir(root)
        .with_context(|| format!("Failed to read dataset directory {}", root.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            targets.push(RepositoryTarget {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
            });
        }
    }
    targets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(targets)
}

/// Whether a stage computed its artifact or found it in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Built,
    Cached,
}

/// What one repository run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub identities: StageOutcome,
    pub transactions: StageOutcome,
    /// True if frequencies were (re)written to the transaction artifact
    pub frequencies_written: bool,
    pub identity_count: usize,
    pub transaction_count: usize,
}

/// Runs the three stages against a store
pub struct Pipeline<'a> {
    config: &'a PipelineConfig,
    store: &'a dyn ArtifactStore,
    progress: &'a dyn ProgressReporter,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a PipelineConfig,
        store: &'a dyn ArtifactStore,
        progress: &'a dyn ProgressReporter,
    ) -> Self {
        Self { config, store, progress }
    }

    /// Process every repository under `root`.
    ///
    /// A failing repository is logged and the remaining ones still run;
    /// the call fails afterwards if any did. Returns the number processed.
    pub fn run_dataset(&self, root: &Path) -> Result<usize> {
        let targets = discover_repositories(root)?;
        info!(
            "Found {} repositories under {}, tracking {} files",
            targets.len(),
            root.display(),
            self.config.filter.extension()
        );

        let mut failed = 0;
        for target in &targets {
            let start = Instant::now();
            let result = GitHistory::open(&target.path, &self.config.filter)
                .and_then(|history| self.run(&target.name, &history));
            match result {
                Ok(summary) => info!(
                    "Finished {} in {:.2?}: {} method ids, {} transactions",
                    target.name,
                    start.elapsed(),
                    summary.identity_count,
                    summary.transaction_count
                ),
                Err(e) => {
                    error!("Failed to process {}: {:#}", target.name, e);
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(PipelineError::RepositoriesFailed {
                failed,
                total: targets.len(),
            }
            .into());
        }
        Ok(targets.len())
    }

    /// Run all stages for one repository named `repo`
    pub fn run(&self, repo: &str, history: &dyn HistorySource) -> Result<RunSummary> {
        let identities = self.identity_stage(repo, history)?;
        let map = self
            .store
            .load_identity_map(repo)
            .with_context(|| format!("Failed to load key-to-method ID mappings for {}", repo))?;

        let transactions = if self.store.has_transactions(repo) {
            info!("A transaction database already exists for {}.", repo);
            StageOutcome::Cached
        } else {
            info!("Transaction database construction for {} started at: {}", repo, current_timestamp());
            let database = build_transactions(
                history,
                self.config.max_commits,
                &self.config.filter,
                &map,
                self.progress,
            )?;
            self.store.save_transactions(repo, &database)?;
            info!("Transaction database construction for {} completed at: {}", repo, current_timestamp());
            StageOutcome::Built
        };

        let mut database = self
            .store
            .load_transactions(repo)
            .with_context(|| format!("Failed to load transaction database for {}", repo))?;

        // A cached, fully annotated database is left untouched
        let needs_update = transactions == StageOutcome::Built || database.iter().any(|t| !t.is_annotated());
        if needs_update {
            info!("Transaction database update for {} started at: {}", repo, current_timestamp());
            annotate_frequencies(&mut database);
            self.store.save_transactions(repo, &database)?;
            info!("Transaction database update for {} completed at: {}", repo, current_timestamp());
        }

        Ok(RunSummary {
            identities,
            transactions,
            frequencies_written: needs_update,
            identity_count: map.len(),
            transaction_count: database.len(),
        })
    }

    fn identity_stage(&self, repo: &str, history: &dyn HistorySource) -> Result<StageOutcome> {
        if self.store.has_identity_map(repo) {
            info!("Key-to-method ID mappings for {} already exist.", repo);
            return Ok(StageOutcome::Cached);
        }

        info!("Key-to-method ID mappings for {} started at: {}", repo, current_timestamp());
        let map = build_identity_map(
            history,
            self.config.max_commits,
            &self.config.filter,
            self.progress,
        )?;
        self.store.save_identity_map(repo, &map)?;
        info!("Key-to-method ID mappings for {} completed at: {}", repo, current_timestamp());
        Ok(StageOutcome::Built)
    }
}
