use std::path::PathBuf;
use thiserror::Error;

/// Failures the binary reports as a non-zero exit
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Path does not exist: {}", .0.display())]
    DatasetNotFound(PathBuf),

    #[error("{failed} of {total} repositories failed")]
    RepositoriesFailed { failed: usize, total: usize },
}
