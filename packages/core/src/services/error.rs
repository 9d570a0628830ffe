//! Service Layer Error Types

use thiserror::Error;

/// Autosave processor errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutosaveError {
    /// The background task is no longer running
    #[error("Autosave processor has stopped")]
    ProcessorStopped,

    /// The background task panicked or was cancelled
    #[error("Autosave task failed: {0}")]
    TaskFailed(String),
}
