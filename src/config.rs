use std::path::PathBuf;

use crate::util::SourceFilter;

/// Default bound on commits scanned per pass
pub const DEFAULT_MAX_COMMITS: usize = 100;

/// Settings shared by every stage of a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Where artifacts are written, one pair per repository
    pub output_dir: PathBuf,
    pub max_commits: usize,
    pub filter: SourceFilter,
    /// Disable progress bars
    pub quiet: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            max_commits: DEFAULT_MAX_COMMITS,
            filter: SourceFilter::default(),
            quiet: false,
        }
    }
}
