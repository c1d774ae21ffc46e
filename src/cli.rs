use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::config::{DEFAULT_MAX_COMMITS, PipelineConfig};
use crate::util::SourceFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cochange",
    version,
    about = "Build method-level co-change transaction databases from git history"
)]
pub struct Cli {
    /// Dataset directory; every subdirectory is a git repository.
    /// Prompted for on stdin when omitted
    pub dataset: Option<PathBuf>,

    /// Directory receiving the mapping and transaction files
    #[arg(long, env = "COCHANGE_OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Maximum number of commits scanned per repository
    #[arg(long, env = "COCHANGE_MAX_COMMITS", default_value_t = DEFAULT_MAX_COMMITS)]
    pub max_commits: usize,

    /// Source file extension to track
    #[arg(long, env = "COCHANGE_EXTENSION", default_value = ".java")]
    pub extension: String,

    /// File-name marker of test files, placed before the extension
    #[arg(long, env = "COCHANGE_TEST_MARKER", default_value = "Test")]
    pub test_marker: String,

    /// Hide progress bars
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn config(&self) -> PipelineConfig {
        PipelineConfig {
            output_dir: self.output_dir.clone(),
            max_commits: self.max_commits,
            filter: SourceFilter::new(&self.extension, &self.test_marker),
            quiet: self.quiet,
        }
    }
}

/// Ask for the dataset directory on stdin
pub fn prompt_dataset_path() -> Result<PathBuf> {
    print!("Enter Dataset Path:");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read dataset path")?;
    Ok(PathBuf::from(line.trim()))
}
