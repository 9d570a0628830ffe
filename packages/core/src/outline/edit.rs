//! Insert, delete, rename, collapse and content edits
//!
//! Inserts always append to the end of the destination group, so they never
//! need to reindex. Delete closes the gap it leaves in its former group.

use super::{rebuild, resequence, Replacements};
use crate::models::{Outline, OutlineNode, DEFAULT_CHAPTER_TITLE, DEFAULT_PART_TITLE};
use std::collections::HashSet;
use std::sync::Arc;

/// Append a chapter to `parent_id` (`None` = top level).
///
/// Returns the new outline and the generated chapter ID. A parent that does
/// not exist or is not a part leaves the outline unchanged and yields `None`.
pub fn insert_chapter(
    outline: &Outline,
    parent_id: Option<&str>,
    title: Option<&str>,
) -> (Outline, Option<String>) {
    if let Some(parent) = parent_id {
        match outline.get(parent) {
            Some(node) if node.is_part() => {}
            Some(node) => {
                tracing::debug!(
                    "Rejected chapter insert under {} '{}'",
                    node.kind,
                    parent
                );
                return (outline.clone(), None);
            }
            None => {
                tracing::debug!("Rejected chapter insert under missing parent '{}'", parent);
                return (outline.clone(), None);
            }
        }
    }

    let chapter = OutlineNode::chapter(
        title.unwrap_or(DEFAULT_CHAPTER_TITLE),
        parent_id.map(str::to_string),
        outline.child_count(parent_id),
    );
    let id = chapter.id.clone();
    (append(outline, chapter), Some(id))
}

/// Append an expanded part to the top level. Returns the new outline and the part ID.
pub fn insert_part(outline: &Outline, title: Option<&str>) -> (Outline, String) {
    let part = OutlineNode::part(
        title.unwrap_or(DEFAULT_PART_TITLE),
        outline.child_count(None),
    );
    let id = part.id.clone();
    (append(outline, part), id)
}

fn append(outline: &Outline, node: OutlineNode) -> Outline {
    let mut nodes = outline.nodes().to_vec();
    nodes.push(Arc::new(node));
    Outline::from_shared(nodes)
}

/// Delete a node and everything under it.
///
/// Deleting a part removes all of its chapters. The deleted node's former
/// siblings are reindexed to close the gap; the removed chapters are not.
pub fn delete_node(outline: &Outline, id: &str) -> Outline {
    let Some(node) = outline.get(id) else {
        return outline.clone();
    };

    let mut removed: HashSet<String> = HashSet::from([node.id.clone()]);
    if node.is_part() {
        removed.extend(
            outline
                .iter()
                .filter(|child| child.is_child_of(Some(id)))
                .map(|child| child.id.clone()),
        );
    }

    let mut siblings = outline.children_of(node.parent_id.as_deref());
    siblings.retain(|sibling| sibling.id != node.id);

    let mut replacements = Replacements::new();
    resequence(&siblings, node.parent_id.as_deref(), &mut replacements);

    tracing::debug!("Deleted '{}' and {} descendant(s)", id, removed.len() - 1);
    rebuild(outline, &replacements, &removed)
}

/// Change a node's title. Unknown IDs and unchanged titles are no-ops.
pub fn rename_node(outline: &Outline, id: &str, title: &str) -> Outline {
    replace_where(outline, id, |node| node.title != title, |node| {
        node.title = title.to_string();
    })
}

/// Flip a part between collapsed and expanded. Chapters and unknown IDs are no-ops.
pub fn toggle_collapsed(outline: &Outline, id: &str) -> Outline {
    replace_where(outline, id, |node| node.is_part(), |node| {
        node.collapsed = !node.collapsed;
    })
}

/// Collapse or expand a single part.
pub fn set_collapsed(outline: &Outline, id: &str, collapsed: bool) -> Outline {
    replace_where(
        outline,
        id,
        |node| node.is_part() && node.collapsed != collapsed,
        |node| node.collapsed = collapsed,
    )
}

/// Collapse or expand every part at once.
pub fn set_all_collapsed(outline: &Outline, collapsed: bool) -> Outline {
    let nodes = outline
        .iter()
        .map(|node| {
            if node.is_part() && node.collapsed != collapsed {
                let mut updated = (**node).clone();
                updated.collapsed = collapsed;
                Arc::new(updated)
            } else {
                Arc::clone(node)
            }
        })
        .collect();
    Outline::from_shared(nodes)
}

/// Replace a chapter's body text and recompute its word count.
///
/// Parts carry no body, so the call is a no-op for them.
pub fn update_content(outline: &Outline, id: &str, content: &str) -> Outline {
    replace_where(
        outline,
        id,
        |node| node.is_chapter() && node.content != content,
        |node| {
            node.content = content.to_string();
            node.word_count = word_count(content);
        },
    )
}

/// Whitespace-separated word count, as shown in the manuscript sidebar
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Rewrite the single node `id` when `applies` holds, sharing every other node.
fn replace_where(
    outline: &Outline,
    id: &str,
    applies: impl Fn(&OutlineNode) -> bool,
    update: impl FnOnce(&mut OutlineNode),
) -> Outline {
    let Some(node) = outline.get(id) else {
        return outline.clone();
    };
    if !applies(&**node) {
        return outline.clone();
    }

    let mut updated = (**node).clone();
    update(&mut updated);

    let mut replacements = Replacements::new();
    replacements.insert(updated.id.clone(), Arc::new(updated));
    rebuild(outline, &replacements, &HashSet::new())
}
