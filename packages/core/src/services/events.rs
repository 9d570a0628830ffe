//! Outline change events
//!
//! The session emits an `OutlineEvent` after every change so that other parts
//! of the application (sidebar, word-count badge, export preview) can react
//! without coupling to the session.
//!
//! Events travel over a tokio broadcast channel; slow subscribers may lag and
//! miss events, but every event carries the full resulting outline, so the
//! latest one is always enough to resynchronize.

use crate::models::Outline;
use crate::operations::OutlineOperation;

#[derive(Debug, Clone)]
pub enum OutlineEvent {
    /// An operation changed the outline
    Changed {
        operation: OutlineOperation,
        outline: Outline,
    },

    /// The last change was undone
    Undone {
        operation: OutlineOperation,
        outline: Outline,
    },

    /// A previously undone change was reapplied
    Redone {
        operation: OutlineOperation,
        outline: Outline,
    },

    /// The outline was swapped wholesale (e.g. reloaded from storage)
    Replaced { outline: Outline },
}

impl OutlineEvent {
    pub fn event_type(&self) -> &str {
        match self {
            OutlineEvent::Changed { .. } => "outline:changed",
            OutlineEvent::Undone { .. } => "outline:undone",
            OutlineEvent::Redone { .. } => "outline:redone",
            OutlineEvent::Replaced { .. } => "outline:replaced",
        }
    }

    /// The outline after the event
    pub fn outline(&self) -> &Outline {
        match self {
            OutlineEvent::Changed { outline, .. }
            | OutlineEvent::Undone { outline, .. }
            | OutlineEvent::Redone { outline, .. }
            | OutlineEvent::Replaced { outline } => outline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_types() {
        let op = OutlineOperation::Delete { id: "a".into() };
        let changed = OutlineEvent::Changed {
            operation: op.clone(),
            outline: Outline::new(),
        };
        let undone = OutlineEvent::Undone {
            operation: op,
            outline: Outline::new(),
        };
        let replaced = OutlineEvent::Replaced {
            outline: Outline::new(),
        };

        assert_eq!(changed.event_type(), "outline:changed");
        assert_eq!(undone.event_type(), "outline:undone");
        assert_eq!(replaced.event_type(), "outline:replaced");
        assert!(replaced.outline().is_empty());
    }
}
