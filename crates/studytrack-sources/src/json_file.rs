//! JSON export source.
//!
//! Reads a JSON array of status records, as exported from the hosted data
//! store, and serves it through the paginated `StatusSource` contract.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

use studytrack_core::error::SourceError;
use studytrack_core::records::{sort_newest_first, ChapterCompletion, StatusRecord};
use studytrack_core::traits::StatusSource;

/// Status records loaded from a JSON file, served newest first.
pub struct JsonFileSource {
    path: PathBuf,
    records: Vec<StatusRecord>,
}

impl JsonFileSource {
    /// Read and decode the file. Records are re-sorted newest first, so the
    /// export does not need to be ordered.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let path = path.into();
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(path.display().to_string())
            } else {
                SourceError::Unavailable(format!("{}: {e}", path.display()))
            }
        })?;

        let mut records: Vec<StatusRecord> = serde_json::from_str(&content)
            .map_err(|e| SourceError::Malformed(format!("{}: {e}", path.display())))?;
        sort_newest_first(&mut records);

        tracing::debug!("loaded {} status records from {}", records.len(), path.display());
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl StatusSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    async fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<StatusRecord>, SourceError> {
        let start = offset.min(self.records.len());
        let end = offset.saturating_add(limit).min(self.records.len());
        Ok(self.records[start..end].to_vec())
    }
}

/// Load chapter completion flags from a JSON array.
pub fn load_completions(path: &Path) -> Result<Vec<ChapterCompletion>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read completions from {}", path.display()))?;
    let completions: Vec<ChapterCompletion> =
        serde_json::from_str(&content).context("failed to parse completions JSON")?;
    Ok(completions)
}
