//! Outline Node Data Structures
//!
//! This module defines `OutlineNode`, the single entity of a manuscript outline,
//! and the closed `NodeKind` enum that separates leaf chapters from part containers.
//!
//! # Wire Format
//!
//! Nodes serialize as camelCase JSON objects. A node at the top of the outline
//! carries the sentinel `"parentId": "root"` rather than `null`, matching the
//! format persisted by the manuscript frontend:
//!
//! ```json
//! { "id": "c1", "kind": "chapter", "title": "Prologue", "parentId": "root", "index": 0 }
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Parent sentinel used on the wire for top-level nodes
pub const ROOT_PARENT: &str = "root";

/// Title given to chapters created without an explicit title
pub const DEFAULT_CHAPTER_TITLE: &str = "Untitled Chapter";

/// Title given to parts created without an explicit title
pub const DEFAULT_PART_TITLE: &str = "Untitled Part";

/// The two kinds of outline node
///
/// A `Part` may contain chapters; a `Chapter` may not contain anything.
/// Parts only ever live at the top of the outline (one level of nesting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Chapter,
    Part,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Chapter => "chapter",
            NodeKind::Part => "part",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chapter or part in the manuscript outline.
///
/// # Fields
///
/// - `id`: Opaque identifier, stable for the node's lifetime (UUID when generated here)
/// - `kind`: Chapter (leaf) or part (container)
/// - `title`: Display title, no uniqueness constraint
/// - `parent_id`: Containing part, or `None` for the top of the outline
/// - `index`: Position among the siblings sharing `parent_id`
/// - `collapsed`: Whether a part hides its chapters in the flattened view
/// - `content` / `word_count` / `properties`: Payload carried through untouched by reordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineNode {
    pub id: String,

    pub kind: NodeKind,

    pub title: String,

    /// `None` means the node sits at the top of the outline
    #[serde(default, with = "root_sentinel")]
    pub parent_id: Option<String>,

    pub index: usize,

    /// Only meaningful for parts
    #[serde(default)]
    pub collapsed: bool,

    /// Chapter body text
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub word_count: usize,

    /// Extra payload owned by the editor (synopsis, status, notes, ...)
    #[serde(default, skip_serializing_if = "is_empty_properties")]
    pub properties: serde_json::Value,
}

impl OutlineNode {
    /// Create a chapter with a generated UUID
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use storyloom_core::models::{NodeKind, OutlineNode};
    /// let chapter = OutlineNode::chapter("Prologue", None, 0);
    /// assert_eq!(chapter.kind, NodeKind::Chapter);
    /// assert!(chapter.is_top_level());
    /// ```
    pub fn chapter(title: impl Into<String>, parent_id: Option<String>, index: usize) -> Self {
        Self::new_with_id(
            Uuid::new_v4().to_string(),
            NodeKind::Chapter,
            title,
            parent_id,
            index,
        )
    }

    /// Create a top-level part with a generated UUID, initially expanded
    pub fn part(title: impl Into<String>, index: usize) -> Self {
        Self::new_with_id(Uuid::new_v4().to_string(), NodeKind::Part, title, None, index)
    }

    /// Create a node with a caller-chosen ID
    ///
    /// Used when restoring nodes from another source and throughout the tests,
    /// where readable IDs make assertions clearer.
    pub fn new_with_id(
        id: impl Into<String>,
        kind: NodeKind,
        title: impl Into<String>,
        parent_id: Option<String>,
        index: usize,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            parent_id,
            index,
            collapsed: false,
            content: String::new(),
            word_count: 0,
            properties: serde_json::Value::Null,
        }
    }

    pub fn is_part(&self) -> bool {
        self.kind == NodeKind::Part
    }

    pub fn is_chapter(&self) -> bool {
        self.kind == NodeKind::Chapter
    }

    /// True when the node has no containing part
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// True when the node is a direct child of `parent` (`None` = top level)
    pub fn is_child_of(&self, parent: Option<&str>) -> bool {
        self.parent_id.as_deref() == parent
    }

    /// Copy of this node placed at `index` under `parent_id`
    pub(crate) fn placed(&self, parent_id: Option<String>, index: usize) -> Self {
        Self {
            parent_id,
            index,
            ..self.clone()
        }
    }
}

fn is_empty_properties(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Serde adapter mapping `None` to the `"root"` parent sentinel.
///
/// Accepts `"root"`, `null`, or a missing field as the top level on input.
mod root_sentinel {
    use super::ROOT_PARENT;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(parent: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(parent.as_deref().unwrap_or(ROOT_PARENT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|id| id != ROOT_PARENT && !id.is_empty()))
    }
}
