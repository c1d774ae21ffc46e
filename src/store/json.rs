use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::ArtifactStore;
use crate::mining::IdentityMap;
use crate::model::TransactionDatabase;

/// JSON artifacts named after the repository inside one output directory
#[derive(Debug, Clone)]
pub struct JsonArtifactStore {
    output_dir: PathBuf,
}

impl JsonArtifactStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn identity_map_path(&self, repo: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_key_to_method_id_mappings.json", repo))
    }

    pub fn transactions_path(&self, repo: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_method_level_transaction_database.json", repo))
    }

    /// Serialize to a sibling temp file, then rename over the target
    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory {}", self.output_dir.display())
        })?;

        let tmp_path = path.with_extension("json.tmp");
        let file = File::create(&tmp_path)
            .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, value)
            .with_context(|| format!("Failed to serialize {}", path.display()))?;
        writer.flush()?;
        drop(writer);

        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to move {} into place", path.display()))?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Malformed artifact {}", path.display()))
    }
}

impl ArtifactStore for JsonArtifactStore {
    fn has_identity_map(&self, repo: &str) -> bool {
        self.identity_map_path(repo).exists()
    }

    fn load_identity_map(&self, repo: &str) -> Result<IdentityMap> {
        Self::read_json(&self.identity_map_path(repo))
    }

    fn save_identity_map(&self, repo: &str, map: &IdentityMap) -> Result<()> {
        self.write_json(&self.identity_map_path(repo), map)
    }

    fn has_transactions(&self, repo: &str) -> bool {
        self.transactions_path(repo).exists()
    }

    fn load_transactions(&self, repo: &str) -> Result<TransactionDatabase> {
        Self::read_json(&self.transactions_path(repo))
    }

    fn save_transactions(&self, repo: &str, database: &TransactionDatabase) -> Result<()> {
        self.write_json(&self.transactions_path(repo), database)
    }
}
