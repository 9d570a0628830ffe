//! Outline Operations
//!
//! This module provides the serializable command form of every outline edit
//! and the error taxonomy used to explain rejected edits.
//!
//! `OutlineOperation` is what the editor sends over the bridge, what the
//! history log records, and what `outline-dev apply` accepts as JSON:
//!
//! ```json
//! { "op": "move", "activeId": "c2", "targetId": "p1", "position": "inside" }
//! ```

pub mod error;

pub use error::OutlineOperationError;

use crate::models::{Outline, DEFAULT_CHAPTER_TITLE, DEFAULT_PART_TITLE};
use crate::outline::{self, DropPosition};
use serde::{Deserialize, Serialize};

/// A single outline edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum OutlineOperation {
    /// Drag-and-drop reparent-and-reindex
    Move {
        active_id: String,
        target_id: String,
        position: DropPosition,
    },
    /// Append a chapter to a part, or to the top level when `parent_id` is absent
    InsertChapter {
        #[serde(default)]
        parent_id: Option<String>,
        #[serde(default)]
        title: Option<String>,
    },
    /// Append a part to the top level
    InsertPart {
        #[serde(default)]
        title: Option<String>,
    },
    Delete {
        id: String,
    },
    Rename {
        id: String,
        title: String,
    },
    ToggleCollapsed {
        id: String,
    },
    SetCollapsed {
        id: String,
        collapsed: bool,
    },
    UpdateContent {
        id: String,
        content: String,
    },
}

/// Titles used when an insert does not name its node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDefaults {
    pub chapter_title: String,
    pub part_title: String,
}

impl Default for OperationDefaults {
    fn default() -> Self {
        Self {
            chapter_title: DEFAULT_CHAPTER_TITLE.to_string(),
            part_title: DEFAULT_PART_TITLE.to_string(),
        }
    }
}

/// Result of applying an operation
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub outline: Outline,
    /// ID of the node created by an insert
    pub created_id: Option<String>,
}

impl OutlineOperation {
    /// Apply this operation to `outline`, returning the new outline.
    ///
    /// Rejected operations return a copy of the input; compare against the
    /// input to detect them.
    pub fn apply(&self, outline: &Outline, defaults: &OperationDefaults) -> Applied {
        let unchanged = |outline: Outline| Applied {
            outline,
            created_id: None,
        };

        match self {
            OutlineOperation::Move {
                active_id,
                target_id,
                position,
            } => unchanged(outline::move_node(outline, active_id, target_id, *position)),
            OutlineOperation::InsertChapter { parent_id, title } => {
                let title = title.as_deref().unwrap_or(&defaults.chapter_title);
                let (outline, created_id) =
                    outline::insert_chapter(outline, parent_id.as_deref(), Some(title));
                Applied {
                    outline,
                    created_id,
                }
            }
            OutlineOperation::InsertPart { title } => {
                let title = title.as_deref().unwrap_or(&defaults.part_title);
                let (outline, created_id) = outline::insert_part(outline, Some(title));
                Applied {
                    outline,
                    created_id: Some(created_id),
                }
            }
            OutlineOperation::Delete { id } => unchanged(outline::delete_node(outline, id)),
            OutlineOperation::Rename { id, title } => {
                unchanged(outline::rename_node(outline, id, title))
            }
            OutlineOperation::ToggleCollapsed { id } => {
                unchanged(outline::toggle_collapsed(outline, id))
            }
            OutlineOperation::SetCollapsed { id, collapsed } => {
                unchanged(outline::set_collapsed(outline, id, *collapsed))
            }
            OutlineOperation::UpdateContent { id, content } => {
                unchanged(outline::update_content(outline, id, content))
            }
        }
    }

    /// Short name for logs and events
    pub fn name(&self) -> &'static str {
        match self {
            OutlineOperation::Move { .. } => "move",
            OutlineOperation::InsertChapter { .. } => "insertChapter",
            OutlineOperation::InsertPart { .. } => "insertPart",
            OutlineOperation::Delete { .. } => "delete",
            OutlineOperation::Rename { .. } => "rename",
            OutlineOperation::ToggleCollapsed { .. } => "toggleCollapsed",
            OutlineOperation::SetCollapsed { .. } => "setCollapsed",
            OutlineOperation::UpdateContent { .. } => "updateContent",
        }
    }
}
