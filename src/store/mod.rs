//! Persistence of the per-repository artifacts
//!
//! - **json**: file-backed store under an output directory

mod json;

pub use json::JsonArtifactStore;

use anyhow::Result;

use crate::mining::IdentityMap;
use crate::model::TransactionDatabase;

/// Persistence layer for the mining stages.
///
/// Presence of an artifact is the only cache signal; contents are never
/// validated beyond parsing on load.
pub trait ArtifactStore {
    fn has_identity_map(&self, repo: &str) -> bool;

    fn load_identity_map(&self, repo: &str) -> Result<IdentityMap>;

    /// Persist the identity map in a single write
    fn save_identity_map(&self, repo: &str, map: &IdentityMap) -> Result<()>;

    fn has_transactions(&self, repo: &str) -> bool;

    fn load_transactions(&self, repo: &str) -> Result<TransactionDatabase>;

    /// Persist (or overwrite) the transaction database in a single write
    fn save_transactions(&self, repo: &str, database: &TransactionDatabase) -> Result<()>;
}
