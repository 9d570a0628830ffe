//! Storage error types

use crate::operations::OutlineOperationError;
use std::path::PathBuf;
use thiserror::Error;

/// Outline storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("Storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored outline is not valid JSON of the expected shape
    #[error("Outline serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stored outline could not be repaired into a valid one
    #[error("Stored outline is corrupt: {0}")]
    Corrupt(#[from] OutlineOperationError),

    /// Failed to create the directory holding the outline file
    #[error("Failed to create storage directory {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Create an I/O error tagged with the file it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a directory creation error
    pub fn directory_creation_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }
}
