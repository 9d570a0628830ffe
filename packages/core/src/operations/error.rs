//! Error types for outline operations
//!
//! The engine functions never return these: a rejected operation hands back the
//! outline unchanged. The typed reasons are produced by the planning and
//! validation layer so callers, logs, and tests can tell *why* a drop snapped back.

use thiserror::Error;

/// Reasons an outline operation is rejected or an outline is inconsistent
///
/// # Examples
///
/// ```rust
/// use storyloom_core::operations::OutlineOperationError;
///
/// let err = OutlineOperationError::node_not_found("chapter-9");
/// assert_eq!(err.to_string(), "Node 'chapter-9' does not exist");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutlineOperationError {
    /// Referenced node does not exist
    ///
    /// Usually a stale ID from a rapid double-invocation in the editor.
    #[error("Node '{node_id}' does not exist")]
    NodeNotFound { node_id: String },

    /// The drop would break the chapter/part nesting rules
    ///
    /// Dropping inside a chapter, nesting a part under a part, or moving a part
    /// next to a chapter that lives inside a part.
    #[error("Invalid placement: {reason}")]
    InvalidPlacement { reason: String },

    /// A node was dropped onto itself
    #[error("Node '{node_id}' cannot be dropped onto itself")]
    SelfDrop { node_id: String },

    /// The collection breaks an outline invariant
    ///
    /// Reported by validation when loading a persisted outline.
    #[error("Outline invariant violated: {reason}")]
    InvariantViolation { reason: String },

    /// Text that does not name a drop position
    #[error("Unknown drop position '{value}' (expected before, after or inside)")]
    UnknownDropPosition { value: String },
}

impl OutlineOperationError {
    /// Create a NodeNotFound error
    pub fn node_not_found(node_id: impl Into<String>) -> Self {
        Self::NodeNotFound {
            node_id: node_id.into(),
        }
    }

    /// Create an InvalidPlacement error
    pub fn invalid_placement(reason: impl Into<String>) -> Self {
        Self::InvalidPlacement {
            reason: reason.into(),
        }
    }

    /// Create a SelfDrop error
    pub fn self_drop(node_id: impl Into<String>) -> Self {
        Self::SelfDrop {
            node_id: node_id.into(),
        }
    }

    /// Create an InvariantViolation error
    pub fn invariant_violation(reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            reason: reason.into(),
        }
    }

    pub fn unknown_drop_position(value: impl Into<String>) -> Self {
        Self::UnknownDropPosition {
            value: value.into(),
        }
    }
}
