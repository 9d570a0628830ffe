//! In-process outline store
//!
//! Keeps the last saved outline in memory and counts writes. Used by tests and
//! by the dev CLI's `--dry-run` mode.

use crate::db::{OutlineStore, StoreError};
use crate::models::Outline;
use crate::outline::normalize;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    outline: RwLock<Option<Outline>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `outline`
    pub fn with_outline(outline: Outline) -> Self {
        Self {
            outline: RwLock::new(Some(outline)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of completed `save` calls
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Last saved (or seeded) outline
    pub async fn snapshot(&self) -> Option<Outline> {
        self.outline.read().await.clone()
    }
}

#[async_trait]
impl OutlineStore for MemoryStore {
    async fn load(&self) -> Result<Option<Outline>, StoreError> {
        Ok(self.snapshot().await.map(|outline| normalize(&outline)))
    }

    async fn save(&self, outline: &Outline) -> Result<(), StoreError> {
        *self.outline.write().await = Some(outline.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
