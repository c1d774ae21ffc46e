//! Progress of the two history passes
//!
//! The passes only see [`ProgressReporter`]; indicatif stays behind it.

use indicatif::{ProgressBar, ProgressStyle};

/// Which traversal of the history is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Identities,
    Transactions,
}

impl Pass {
    pub fn label(self) -> &'static str {
        match self {
            Pass::Identities => "Resolving method identities",
            Pass::Transactions => "Building transactions",
        }
    }
}

/// Tracks one pass over the history
pub trait PassProgress {
    /// A commit was handed to the pass
    fn commit_visited(&self, hash: &str);
    /// The traversal ended after `visited` commits
    fn finish(&self, visited: usize);
}

/// Starts a [`PassProgress`] for each pass
pub trait ProgressReporter {
    /// `bound` is the commit limit; histories may run out before it
    fn begin_pass(&self, pass: Pass, bound: usize) -> Box<dyn PassProgress>;
}

/// Terminal progress bar, one per pass
pub struct IndicatifProgress;

impl IndicatifProgress {
    fn bar(pass: Pass, bound: usize) -> ProgressBar {
        let pb = ProgressBar::new(bound as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {prefix}: [{bar:40.cyan/blue}] {pos}/{len} commits {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_prefix(pass.label());
        pb
    }
}

impl ProgressReporter for IndicatifProgress {
    fn begin_pass(&self, pass: Pass, bound: usize) -> Box<dyn PassProgress> {
        Box::new(CommitBar(Self::bar(pass, bound)))
    }
}

struct CommitBar(ProgressBar);

impl PassProgress for CommitBar {
    fn commit_visited(&self, hash: &str) {
        let short = hash.get(..10).unwrap_or(hash);
        self.0.set_message(short.to_string());
        self.0.inc(1);
    }

    fn finish(&self, visited: usize) {
        // Short histories stop before the bound
        self.0.set_length(visited as u64);
        self.0.finish_and_clear();
    }
}

/// Reports nothing; used by tests, benches and `--quiet`
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn begin_pass(&self, _pass: Pass, _bound: usize) -> Box<dyn PassProgress> {
        Box::new(NoopPass)
    }
}

struct NoopPass;

impl PassProgress for NoopPass {
    fn commit_visited(&self, _hash: &str) {}
    fn finish(&self, _visited: usize) {}
}

/// Choose the reporter for the `--quiet` flag
pub fn reporter(quiet: bool) -> Box<dyn ProgressReporter> {
    if quiet {
        Box::new(NoopProgress)
    } else {
        Box::new(IndicatifProgress)
    }
}
