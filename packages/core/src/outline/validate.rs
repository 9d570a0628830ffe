//! Outline invariant checks and repair
//!
//! The engine preserves these invariants on its own. Checking matters at the
//! edges, when an outline arrives from storage or from another process:
//!
//! 1. IDs are unique
//! 2. Every sibling group is indexed exactly `0..n-1`
//! 3. Every parent reference names an existing part
//! 4. Parts only live at the top level

use crate::models::{Outline, OutlineNode};
use crate::operations::OutlineOperationError;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

/// Every invariant violation in the outline, in a stable order.
pub fn violations(outline: &Outline) -> Vec<OutlineOperationError> {
    let mut found = Vec::new();

    let mut seen = HashSet::new();
    for node in outline.iter() {
        if !seen.insert(node.id.as_str()) {
            found.push(OutlineOperationError::invariant_violation(format!(
                "duplicate id '{}'",
                node.id
            )));
        }
    }

    let by_id: HashMap<&str, &OutlineNode> = outline
        .iter()
        .map(|node| (node.id.as_str(), &**node))
        .collect();

    for node in outline.iter() {
        let Some(parent_id) = node.parent_id.as_deref() else {
            continue;
        };
        if node.is_part() {
            found.push(OutlineOperationError::invariant_violation(format!(
                "part '{}' is nested under '{}'",
                node.id, parent_id
            )));
            continue;
        }
        match by_id.get(parent_id) {
            None => found.push(OutlineOperationError::invariant_violation(format!(
                "'{}' references missing parent '{}'",
                node.id, parent_id
            ))),
            Some(parent) if !parent.is_part() => {
                found.push(OutlineOperationError::invariant_violation(format!(
                    "'{}' is nested under {} '{}'",
                    node.id, parent.kind, parent_id
                )))
            }
            Some(_) => {}
        }
    }

    let mut groups: BTreeMap<Option<&str>, Vec<usize>> = BTreeMap::new();
    for node in outline.iter() {
        groups
            .entry(node.parent_id.as_deref())
            .or_default()
            .push(node.index);
    }
    for (parent, mut indices) in groups {
        indices.sort_unstable();
        let contiguous = indices.iter().enumerate().all(|(i, index)| i == *index);
        if !contiguous {
            found.push(OutlineOperationError::invariant_violation(format!(
                "children of '{}' have indices {:?}, expected 0..{}",
                parent.unwrap_or(crate::models::ROOT_PARENT),
                indices,
                indices.len()
            )));
        }
    }

    found
}

/// First invariant violation, if any.
pub fn validate(outline: &Outline) -> Result<(), OutlineOperationError> {
    match violations(outline).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Repair an outline so that [`validate`] passes.
///
/// - Later duplicates of an ID are dropped
/// - Nested parts and nodes whose parent is missing or not a part move to the top level
/// - Every group is renumbered `0..n-1`, keeping existing index order
///
/// Writing is never discarded: orphaned chapters are lifted rather than removed.
/// Valid outlines come back with every allocation shared.
pub fn normalize(outline: &Outline) -> Outline {
    let mut seen = HashSet::new();
    let unique: Vec<Arc<OutlineNode>> = outline
        .iter()
        .filter(|node| seen.insert(node.id.clone()))
        .cloned()
        .collect();

    let parts: HashSet<&str> = unique
        .iter()
        .filter(|node| node.is_part())
        .map(|node| node.id.as_str())
        .collect();

    let lifted: Vec<Arc<OutlineNode>> = unique
        .iter()
        .map(|node| match node.parent_id.as_deref() {
            Some(parent) if node.is_part() || !parts.contains(parent) => {
                tracing::warn!(
                    "Lifting '{}' to the top level (invalid parent '{}')",
                    node.id,
                    parent
                );
                Arc::new(node.placed(None, node.index))
            }
            _ => Arc::clone(node),
        })
        .collect();

    let mut groups: BTreeMap<Option<String>, Vec<Arc<OutlineNode>>> = BTreeMap::new();
    for node in &lifted {
        groups
            .entry(node.parent_id.clone())
            .or_default()
            .push(Arc::clone(node));
    }

    let mut renumbered: HashMap<String, Arc<OutlineNode>> = HashMap::new();
    for (parent, mut group) in groups {
        group.sort_by_key(|node| node.index);
        for (index, node) in group.into_iter().enumerate() {
            let node = if node.index == index {
                node
            } else {
                Arc::new(node.placed(parent.clone(), index))
            };
            renumbered.insert(node.id.clone(), node);
        }
    }

    let nodes = lifted
        .iter()
        .filter_map(|node| renumbered.remove(&node.id))
        .collect();
    Outline::from_shared(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    fn node(id: &str, kind: NodeKind, parent: Option<&str>, index: usize) -> OutlineNode {
        OutlineNode::new_with_id(id, kind, id.to_uppercase(), parent.map(str::to_string), index)
    }

    #[test]
    fn test_valid_outline_passes() {
        let outline = Outline::from_nodes(vec![
            node("a", NodeKind::Part, None, 0),
            node("x", NodeKind::Chapter, None, 1),
            node("y", NodeKind::Chapter, Some("a"), 0),
        ]);
        assert!(validate(&outline).is_ok());
        assert!(violations(&outline).is_empty());
    }

    #[test]
    fn test_detects_index_gap() {
        let outline = Outline::from_nodes(vec![
            node("a", NodeKind::Chapter, None, 0),
            node("b", NodeKind::Chapter, None, 2),
        ]);
        let err = validate(&outline).unwrap_err();
        assert!(err.to_string().contains("expected 0..2"));
    }

    #[test]
    fn test_detects_duplicate_index() {
        let outline = Outline::from_nodes(vec![
            node("a", NodeKind::Chapter, None, 0),
            node("b", NodeKind::Chapter, None, 0),
        ]);
        assert!(validate(&outline).is_err());
    }

    #[test]
    fn test_detects_structural_violations() {
        let outline = Outline::from_nodes(vec![
            node("a", NodeKind::Part, None, 0),
            node("b", NodeKind::Part, Some("a"), 0),
            node("x", NodeKind::Chapter, None, 1),
            node("y", NodeKind::Chapter, Some("x"), 0),
            node("z", NodeKind::Chapter, Some("ghost"), 0),
            node("z", NodeKind::Chapter, None, 2),
        ]);
        let messages: Vec<String> = violations(&outline).iter().map(|e| e.to_string()).collect();

        assert!(messages.iter().any(|m| m.contains("duplicate id 'z'")));
        assert!(messages.iter().any(|m| m.contains("part 'b' is nested")));
        assert!(messages.iter().any(|m| m.contains("nested under chapter 'x'")));
        assert!(messages.iter().any(|m| m.contains("missing parent 'ghost'")));
    }

    #[test]
    fn test_normalize_repairs_everything() {
        let outline = Outline::from_nodes(vec![
            node("a", NodeKind::Part, None, 3),
            node("b", NodeKind::Part, Some("a"), 0),
            node("x", NodeKind::Chapter, None, 7),
            node("y", NodeKind::Chapter, Some("ghost"), 1),
            node("y", NodeKind::Chapter, None, 9),
            node("c", NodeKind::Chapter, Some("a"), 5),
        ]);
        let repaired = normalize(&outline);

        assert!(validate(&repaired).is_ok());
        assert_eq!(repaired.len(), 5);
        assert!(repaired.get("b").unwrap().is_top_level());
        assert!(repaired.get("y").unwrap().is_top_level());
        assert_eq!(repaired.get("c").unwrap().index, 0);

        let top: Vec<String> = repaired
            .children_of(None)
            .iter()
            .map(|n| n.id.clone())
            .collect();
        // b (0) and y (1) were lifted with their old indices, then a (3) and x (7)
        assert_eq!(top, vec!["b", "y", "a", "x"]);
    }

    #[test]
    fn test_normalize_valid_outline_shares_nodes() {
        let outline = Outline::from_nodes(vec![
            node("a", NodeKind::Part, None, 0),
            node("y", NodeKind::Chapter, Some("a"), 0),
        ]);
        let repaired = normalize(&outline);
        for original in outline.iter() {
            assert!(Arc::ptr_eq(original, repaired.get(&original.id).unwrap()));
        }
    }
}
