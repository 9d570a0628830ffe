//! Outline Tree Engine
//!
//! Pure, synchronous functions over an [`Outline`]: every operation borrows the
//! current collection and returns a new one. Nothing here performs I/O, keeps
//! state between calls, or panics on stale IDs.
//!
//! # Operations
//!
//! - [`flatten`] / [`flatten_with_depth`] - Visible ordered sequence for rendering
//! - [`move_node`] - Reparent-and-reindex for drag-and-drop
//! - [`insert_chapter`] / [`insert_part`] - Append new nodes
//! - [`delete_node`] - Cascading delete with sibling reindex
//! - [`rename_node`], [`toggle_collapsed`], [`set_collapsed`], [`update_content`]
//! - [`validate`] / [`normalize`] - Invariant checks and repair of loaded data
//!
//! # Failure Semantics
//!
//! Operations are total. An unknown ID or an illegal placement returns the
//! input unchanged, so `result == input` is the rejection signal.
//!
//! # Referential Stability
//!
//! Only the sibling groups an operation rewrites get new `Arc` allocations.
//! Every other node in the result is the same allocation as in the input.

mod edit;
mod flatten;
mod reorder;
mod stats;
mod validate;

pub use edit::{
    delete_node, insert_chapter, insert_part, rename_node, set_all_collapsed, set_collapsed,
    toggle_collapsed, update_content, word_count,
};
pub use flatten::{flatten, flatten_with_depth, FlatItem};
pub use reorder::{move_node, plan_move, DropPosition, MovePlan};
pub use stats::{word_count_summary, PartWordCount, WordCountSummary};
pub use validate::{normalize, validate, violations};

use crate::models::{Outline, OutlineNode};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Rewritten nodes keyed by ID
type Replacements = HashMap<String, Arc<OutlineNode>>;

/// Assign `0..n-1` to `group` in its current order under `parent`.
///
/// Nodes that already hold the right parent and index are left out of
/// `replacements` and keep their allocation.
fn resequence(group: &[Arc<OutlineNode>], parent: Option<&str>, replacements: &mut Replacements) {
    for (index, node) in group.iter().enumerate() {
        if node.index != index || node.parent_id.as_deref() != parent {
            replacements.insert(
                node.id.clone(),
                Arc::new(node.placed(parent.map(str::to_string), index)),
            );
        }
    }
}

/// Build the result collection in storage order, dropping `removed` IDs and
/// swapping in `replacements`.
fn rebuild(outline: &Outline, replacements: &Replacements, removed: &HashSet<String>) -> Outline {
    let nodes = outline
        .iter()
        .filter(|node| !removed.contains(&node.id))
        .map(|node| {
            replacements
                .get(&node.id)
                .cloned()
                .unwrap_or_else(|| Arc::clone(node))
        })
        .collect();
    Outline::from_shared(nodes)
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;
