//! Outline configuration
//!
//! Loaded from a JSON file (missing file or missing fields fall back to
//! defaults), then overridden from the environment:
//!
//! - `STORYLOOM_STORE_PATH` - Outline file location
//! - `STORYLOOM_AUTOSAVE_MS` - Autosave debounce in milliseconds

use crate::models::{DEFAULT_CHAPTER_TITLE, DEFAULT_PART_TITLE};
use crate::operations::OperationDefaults;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const STORE_PATH_ENV: &str = "STORYLOOM_STORE_PATH";
pub const AUTOSAVE_MS_ENV: &str = "STORYLOOM_AUTOSAVE_MS";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Cannot determine home directory")]
    NoHomeDirectory,
}

/// Configuration for an outline session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Title for chapters inserted without one
    pub default_chapter_title: String,

    /// Title for parts inserted without one
    pub default_part_title: String,

    /// Maximum number of undoable changes
    pub history_limit: usize,

    /// Quiet period before the autosave task writes
    pub autosave_debounce_ms: u64,

    /// Outline file; `None` resolves to `~/.storyloom/outline.json`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            default_chapter_title: DEFAULT_CHAPTER_TITLE.to_string(),
            default_part_title: DEFAULT_PART_TITLE.to_string(),
            history_limit: 100,
            autosave_debounce_ms: 1500,
            store_path: None,
        }
    }
}

impl OutlineConfig {
    /// Load configuration from a JSON file, or defaults if the file does not exist
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `STORYLOOM_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// Unparseable values are ignored with a warning.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(STORE_PATH_ENV).filter(|p| !p.is_empty()) {
            self.store_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup(AUTOSAVE_MS_ENV) {
            match raw.parse::<u64>() {
                Ok(ms) => self.autosave_debounce_ms = ms,
                Err(_) => tracing::warn!("Ignoring {}={:?}: not a number", AUTOSAVE_MS_ENV, raw),
            }
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid(
                "history_limit must be greater than 0".to_string(),
            ));
        }

        if self.autosave_debounce_ms == 0 {
            return Err(ConfigError::Invalid(
                "autosave_debounce_ms must be greater than 0".to_string(),
            ));
        }

        if self.default_chapter_title.trim().is_empty() || self.default_part_title.trim().is_empty()
        {
            return Err(ConfigError::Invalid(
                "default titles cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Outline file location, resolving the default under the home directory
    ///
    /// - macOS/Linux: ~/.storyloom/outline.json
    /// - Windows: %USERPROFILE%\.storyloom\outline.json
    pub fn resolve_store_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.store_path {
            return Ok(path.clone());
        }
        let home_dir = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(home_dir.join(".storyloom").join("outline.json"))
    }

    pub fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }

    pub fn operation_defaults(&self) -> OperationDefaults {
        OperationDefaults {
            chapter_title: self.default_chapter_title.clone(),
            part_title: self.default_part_title.clone(),
        }
    }
}
