//! Method-level co-change transaction databases from git history
//!
//! Library crate exposing modules for the binary and integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod mining;
pub mod model;
pub mod pipeline;
pub mod store;
pub mod util;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::{Pipeline, RunSummary, StageOutcome};
