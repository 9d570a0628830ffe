//! Reparent-and-reindex for drag-and-drop
//!
//! Resolves "node A was dropped before/after/inside node B" into a consistent
//! outline. Only two sibling groups are ever rewritten: the destination group
//! and, when the node changed parents, the group it left.

use super::{rebuild, resequence, Replacements};
use crate::models::{NodeKind, Outline, OutlineNode};
use crate::operations::OutlineOperationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Where the dragged node lands relative to the drop target.
///
/// Classifying a pointer position into one of these is the UI's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    /// Sibling immediately before the target
    Before,
    /// Sibling immediately after the target
    After,
    /// Last child of the target (target must be a part)
    Inside,
}

impl std::str::FromStr for DropPosition {
    type Err = OutlineOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "before" => Ok(DropPosition::Before),
            "after" => Ok(DropPosition::After),
            "inside" => Ok(DropPosition::Inside),
            _ => Err(OutlineOperationError::unknown_drop_position(s)),
        }
    }
}

/// A validated move, ready to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub active_id: String,
    pub old_parent: Option<String>,
    pub new_parent: Option<String>,
    /// Position in the destination group after the active node is taken out
    pub insert_at: usize,
}

impl MovePlan {
    pub fn changes_parent(&self) -> bool {
        self.old_parent != self.new_parent
    }
}

/// Check a drop against the nesting rules and work out where it lands.
///
/// # Errors
///
/// - `SelfDrop` when `active_id == target_id`
/// - `NodeNotFound` when either ID is absent
/// - `InvalidPlacement` for `Inside` a chapter, a part dropped `Inside` anything,
///   or a part dropped next to a chapter that lives inside a part
pub fn plan_move(
    outline: &Outline,
    active_id: &str,
    target_id: &str,
    position: DropPosition,
) -> Result<MovePlan, OutlineOperationError> {
    if active_id == target_id {
        return Err(OutlineOperationError::self_drop(active_id));
    }

    let active = outline
        .get(active_id)
        .ok_or_else(|| OutlineOperationError::node_not_found(active_id))?;
    let target = outline
        .get(target_id)
        .ok_or_else(|| OutlineOperationError::node_not_found(target_id))?;

    let new_parent = match position {
        DropPosition::Inside => {
            if target.kind != NodeKind::Part {
                return Err(OutlineOperationError::invalid_placement(format!(
                    "cannot drop inside {} '{}'",
                    target.kind, target.id
                )));
            }
            if active.is_part() {
                return Err(OutlineOperationError::invalid_placement(format!(
                    "part '{}' cannot be nested inside part '{}'",
                    active.id, target.id
                )));
            }
            Some(target.id.clone())
        }
        DropPosition::Before | DropPosition::After => {
            if active.is_part() && !target.is_top_level() {
                return Err(OutlineOperationError::invalid_placement(format!(
                    "part '{}' must stay at the top level",
                    active.id
                )));
            }
            target.parent_id.clone()
        }
    };

    let siblings = destination_group(outline, active_id, new_parent.as_deref());
    let insert_at = match position {
        DropPosition::Inside => siblings.len(),
        DropPosition::Before | DropPosition::After => {
            let at = siblings
                .iter()
                .position(|node| node.id == target_id)
                .ok_or_else(|| {
                    OutlineOperationError::invariant_violation(format!(
                        "target '{target_id}' missing from its own sibling group"
                    ))
                })?;
            if position == DropPosition::After {
                at + 1
            } else {
                at
            }
        }
    };

    Ok(MovePlan {
        active_id: active.id.clone(),
        old_parent: active.parent_id.clone(),
        new_parent,
        insert_at,
    })
}

/// Move `active_id` before, after, or inside `target_id`.
///
/// Rejected drops (see [`plan_move`]) return the outline unchanged. A part
/// carries its chapters along: they keep their parent and indices.
///
/// # Examples
///
/// ```rust
/// # use storyloom_core::models::{NodeKind, Outline, OutlineNode};
/// # use storyloom_core::outline::{move_node, DropPosition};
/// let outline = Outline::from_nodes(vec![
///     OutlineNode::new_with_id("a", NodeKind::Part, "Part A", None, 0),
///     OutlineNode::new_with_id("x", NodeKind::Chapter, "X", None, 1),
///     OutlineNode::new_with_id("y", NodeKind::Chapter, "Y", Some("a".into()), 0),
/// ]);
///
/// let moved = move_node(&outline, "x", "a", DropPosition::Inside);
/// let x = moved.get("x").unwrap();
/// assert_eq!(x.parent_id.as_deref(), Some("a"));
/// assert_eq!(x.index, 1);
/// ```
pub fn move_node(
    outline: &Outline,
    active_id: &str,
    target_id: &str,
    position: DropPosition,
) -> Outline {
    match plan_move(outline, active_id, target_id, position) {
        Ok(plan) => apply_plan(outline, &plan),
        Err(e) => {
            tracing::debug!(
                "Rejected move of '{}' {:?} '{}': {}",
                active_id,
                position,
                target_id,
                e
            );
            outline.clone()
        }
    }
}

fn apply_plan(outline: &Outline, plan: &MovePlan) -> Outline {
    let Some(active) = outline.get(&plan.active_id) else {
        return outline.clone();
    };

    let mut replacements = Replacements::new();

    let mut group = destination_group(outline, &plan.active_id, plan.new_parent.as_deref());
    let insert_at = plan.insert_at.min(group.len());
    group.insert(insert_at, Arc::clone(active));
    resequence(&group, plan.new_parent.as_deref(), &mut replacements);

    if plan.changes_parent() {
        let vacated = destination_group(outline, &plan.active_id, plan.old_parent.as_deref());
        resequence(&vacated, plan.old_parent.as_deref(), &mut replacements);
    }

    rebuild(outline, &replacements, &HashSet::new())
}

/// Children of `parent` sorted by index, without the node being moved
fn destination_group(
    outline: &Outline,
    active_id: &str,
    parent: Option<&str>,
) -> Vec<Arc<OutlineNode>> {
    let mut group = outline.children_of(parent);
    group.retain(|node| node.id != active_id);
    group
}
