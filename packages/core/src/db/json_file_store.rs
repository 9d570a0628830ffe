//! JSON file backend
//!
//! Stores the outline as a single pretty-printed JSON array. Writes go to a
//! temporary sibling file first and are renamed into place, so a crash mid-write
//! leaves the previous outline intact.

use crate::db::{OutlineStore, StoreError};
use crate::models::Outline;
use crate::outline::{normalize, validate, violations};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Outline persisted as one JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "outline.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Read the file exactly as stored, without repairing it
    pub async fn load_raw(&self) -> Result<Option<Outline>, StoreError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No outline stored at {:?}", self.path);
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }
}

#[async_trait]
impl OutlineStore for JsonFileStore {
    async fn load(&self) -> Result<Option<Outline>, StoreError> {
        let Some(outline) = self.load_raw().await? else {
            return Ok(None);
        };

        let problems = violations(&outline);
        if problems.is_empty() {
            tracing::info!("Loaded {} outline nodes from {:?}", outline.len(), self.path);
            return Ok(Some(outline));
        }

        for problem in &problems {
            tracing::warn!("Repairing stored outline {:?}: {}", self.path, problem);
        }
        let repaired = normalize(&outline);
        validate(&repaired)?;
        Ok(Some(repaired))
    }

    async fn save(&self, outline: &Outline) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| StoreError::directory_creation_failed(dir, e))?;
        }

        let serialized = serde_json::to_string_pretty(outline)?;
        let temp = self.temp_path();

        // Atomic write: write to temp file, then rename
        fs::write(&temp, serialized)
            .await
            .map_err(|e| StoreError::io(&temp, e))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        tracing::debug!("Saved {} outline nodes to {:?}", outline.len(), self.path);
        Ok(())
    }
}
