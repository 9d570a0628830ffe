//! OutlineStore Trait - Persistence Abstraction
//!
//! The engine never performs I/O. Whatever owns the outline (the session's
//! autosave task, the dev CLI) hands the collection to an `OutlineStore`.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: Backends may be files, HTTP endpoints, or databases
//! 2. **Whole-Collection Writes**: The outline is small; every save writes the
//!    full JSON array and the last write wins
//! 3. **Repair on Load**: Every backend runs what it reads through
//!    `normalize`, so callers always receive an outline that passes validation

use crate::db::StoreError;
use crate::models::Outline;
use async_trait::async_trait;

/// Abstraction over outline persistence backends
///
/// Implementations must be `Send + Sync` so a store can be shared with the
/// background autosave task.
#[async_trait]
pub trait OutlineStore: Send + Sync {
    /// Load the stored outline
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<Outline>, StoreError>;

    /// Replace the stored outline with `outline`
    async fn save(&self, outline: &Outline) -> Result<(), StoreError>;
}
