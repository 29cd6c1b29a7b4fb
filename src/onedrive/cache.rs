//! Local snapshot of the OneDrive listing.
//!
//! A single JSON array of raw drive items, rewritten wholesale after every
//! live fetch. The snapshot is a pure cache: it may be stale, and any
//! problem reading or writing it degrades to a live fetch rather than an
//! error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::types::DriveItem;

pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the raw snapshot entries. Callers filter out non-file records.
    pub async fn load(&self) -> Result<Vec<DriveItem>> {
        let raw = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read snapshot {}", self.path.display()))?;
        let items: Vec<DriveItem> = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse snapshot {}", self.path.display()))?;
        Ok(items)
    }

    /// Replace the snapshot with the given items.
    ///
    /// Written to a sibling temp file first and renamed into place, so a
    /// crash mid-write never leaves a truncated snapshot behind.
    pub async fn store(&self, items: &[DriveItem]) -> Result<()> {
        let data = serde_json::to_vec(items).context("failed to serialize snapshot")?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &data)
            .await
            .with_context(|| format!("failed to write snapshot {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("failed to replace snapshot {}", self.path.display()))?;
        Ok(())
    }
}
