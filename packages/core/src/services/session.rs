//! Outline editing session
//!
//! Owns the current outline and routes every edit through the pure engine,
//! then records history, notifies subscribers and schedules an autosave.
//! Operations that leave the outline unchanged do none of those things.

use crate::config::OutlineConfig;
use crate::models::{Outline, OutlineNode};
use crate::operations::{OperationDefaults, OutlineOperation};
use crate::outline;
use crate::services::autosave::AutosaveHandle;
use crate::services::events::OutlineEvent;
use crate::services::history::{HistoryEntry, OutlineHistory};
use std::sync::Arc;
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// What `OutlineSession::apply` did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplyOutcome {
    /// False when the operation was rejected or had no effect
    pub changed: bool,
    /// ID of the node created by an insert
    pub created_id: Option<String>,
}

pub struct OutlineSession {
    outline: Outline,
    history: OutlineHistory,
    defaults: OperationDefaults,
    events: broadcast::Sender<OutlineEvent>,
    autosave: Option<AutosaveHandle>,
}

impl OutlineSession {
    /// Start a session on `outline`, repairing it if it breaks an invariant
    pub fn new(outline: Outline, config: &OutlineConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            outline: outline::normalize(&outline),
            history: OutlineHistory::new(config.history_limit),
            defaults: config.operation_defaults(),
            events,
            autosave: None,
        }
    }

    /// Schedule a save through `handle` after every change
    pub fn with_autosave(mut self, handle: AutosaveHandle) -> Self {
        self.autosave = Some(handle);
        self
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Visible rows of the current outline
    pub fn flatten(&self) -> Vec<Arc<OutlineNode>> {
        outline::flatten(&self.outline)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OutlineEvent> {
        self.events.subscribe()
    }

    /// Apply an edit to the current outline
    pub fn apply(&mut self, operation: OutlineOperation) -> ApplyOutcome {
        let applied = operation.apply(&self.outline, &self.defaults);
        if applied.outline == self.outline {
            tracing::debug!("Operation '{}' left the outline unchanged", operation.name());
            return ApplyOutcome::default();
        }

        let before = std::mem::replace(&mut self.outline, applied.outline);
        self.history.record(HistoryEntry::new(
            before,
            operation.clone(),
            self.outline.clone(),
        ));
        self.publish(OutlineEvent::Changed {
            operation,
            outline: self.outline.clone(),
        });

        ApplyOutcome {
            changed: true,
            created_id: applied.created_id,
        }
    }

    /// Revert the latest change. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.undo() else {
            return false;
        };
        let (operation, before) = (entry.operation.clone(), entry.before.clone());
        self.outline = before;
        self.publish(OutlineEvent::Undone {
            operation,
            outline: self.outline.clone(),
        });
        true
    }

    /// Reapply the latest undone change. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.redo() else {
            return false;
        };
        let (operation, after) = (entry.operation.clone(), entry.after.clone());
        self.outline = after;
        self.publish(OutlineEvent::Redone {
            operation,
            outline: self.outline.clone(),
        });
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Swap in a whole outline (e.g. reloaded from disk), clearing history
    ///
    /// The outline is repaired with [`outline::normalize`] first, so the
    /// session never holds an outline that fails validation.
    pub fn replace(&mut self, outline: Outline) {
        self.outline = outline::normalize(&outline);
        self.history.clear();
        self.publish(OutlineEvent::Replaced {
            outline: self.outline.clone(),
        });
    }

    fn publish(&self, event: OutlineEvent) {
        tracing::debug!("Outline event: {}", event.event_type());
        if let Some(autosave) = &self.autosave {
            autosave.schedule(event.outline().clone());
        }
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
