//! File-backed snapshot storage for the standalone binary

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::snapshot::GameSnapshot;

/// Writes and reads snapshots as JSON files.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a snapshot, replacing any previous one atomically.
    pub async fn save(&self, snapshot: &GameSnapshot) -> Result<()> {
        let json = serde_json::to_vec_pretty(snapshot).context("Failed to encode snapshot")?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &json)
            .await
            .with_context(|| format!("Failed to write snapshot to {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to move snapshot into {}", self.path.display()))?;
        Ok(())
    }

    /// Load the stored snapshot, or `None` when no file exists yet.
    pub async fn load(&self) -> Result<Option<GameSnapshot>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let snapshot = serde_json::from_slice(&bytes)
                    .with_context(|| format!("Corrupted snapshot at {}", self.path.display()))?;
                Ok(Some(snapshot))
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => {
                Err(error).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        }
    }
}
