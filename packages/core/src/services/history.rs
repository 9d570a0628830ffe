//! Undo/redo history
//!
//! An append-only log of `(before, operation, after)` snapshots. Outlines share
//! node allocations between snapshots, so each entry costs one `Vec` of `Arc`s
//! rather than a deep copy of the manuscript.

use crate::models::Outline;
use crate::operations::OutlineOperation;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// One recorded change
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub before: Outline,
    pub operation: OutlineOperation,
    pub after: Outline,
    pub applied_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(before: Outline, operation: OutlineOperation, after: Outline) -> Self {
        Self {
            before,
            operation,
            after,
            applied_at: Utc::now(),
        }
    }
}

/// Bounded undo stack plus redo stack
#[derive(Debug, Clone)]
pub struct OutlineHistory {
    undo: VecDeque<HistoryEntry>,
    redo: Vec<HistoryEntry>,
    limit: usize,
}

impl OutlineHistory {
    /// Create a history keeping at most `limit` undoable entries (minimum 1)
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record a change. Clears the redo stack and evicts the oldest entry when full.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.redo.clear();
        self.undo.push_back(entry);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
    }

    /// Move the latest entry to the redo stack and return it
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        let entry = self.undo.pop_back()?;
        tracing::debug!("Undo '{}'", entry.operation.name());
        self.redo.push(entry);
        self.redo.last()
    }

    /// Move the latest undone entry back to the undo stack and return it
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        let entry = self.redo.pop()?;
        tracing::debug!("Redo '{}'", entry.operation.name());
        self.undo.push_back(entry);
        self.undo.back()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
