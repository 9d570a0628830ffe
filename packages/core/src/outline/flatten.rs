//! Tree to visible sequence
//!
//! Flattening is recomputed from the collection on every call. Collapsed parts
//! hide their chapters without touching them, so expanding again restores the
//! exact previous sequence.

use crate::models::{Outline, OutlineNode};
use std::collections::HashMap;
use std::sync::Arc;

/// One row of the flattened outline
#[derive(Debug, Clone, PartialEq)]
pub struct FlatItem {
    pub node: Arc<OutlineNode>,
    /// 0 for top-level nodes, 1 for chapters inside a part
    pub depth: usize,
}

/// Visible nodes in display order.
///
/// Top-level nodes sorted by index; each expanded part is followed directly by
/// its chapters sorted by index.
pub fn flatten(outline: &Outline) -> Vec<Arc<OutlineNode>> {
    flatten_with_depth(outline)
        .into_iter()
        .map(|item| item.node)
        .collect()
}

/// Like [`flatten`], with the indentation depth of each row.
pub fn flatten_with_depth(outline: &Outline) -> Vec<FlatItem> {
    let mut top_level: Vec<&Arc<OutlineNode>> = Vec::new();
    let mut children: HashMap<&str, Vec<&Arc<OutlineNode>>> = HashMap::new();

    for node in outline.iter() {
        match node.parent_id.as_deref() {
            None => top_level.push(node),
            Some(parent) => children.entry(parent).or_default().push(node),
        }
    }

    top_level.sort_by_key(|node| node.index);
    for group in children.values_mut() {
        group.sort_by_key(|node| node.index);
    }

    let mut items = Vec::with_capacity(outline.len());
    for node in top_level {
        items.push(FlatItem {
            node: Arc::clone(node),
            depth: 0,
        });

        if node.is_part() && !node.collapsed {
            if let Some(group) = children.get(node.id.as_str()) {
                items.extend(group.iter().map(|child| FlatItem {
                    node: Arc::clone(child),
                    depth: 1,
                }));
            }
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    fn ids(nodes: &[Arc<OutlineNode>]) -> Vec<&str> {
        nodes.iter().map(|n| n.id.as_str()).collect()
    }

    fn outline(collapsed: bool) -> Outline {
        let mut part = OutlineNode::new_with_id("a", NodeKind::Part, "Part A", None, 0);
        part.collapsed = collapsed;
        Outline::from_nodes(vec![
            OutlineNode::new_with_id("x", NodeKind::Chapter, "X", None, 1),
            OutlineNode::new_with_id("z", NodeKind::Chapter, "Z", Some("a".into()), 1),
            part,
            OutlineNode::new_with_id("y", NodeKind::Chapter, "Y", Some("a".into()), 0),
            OutlineNode::new_with_id("b", NodeKind::Part, "Part B", None, 2),
        ])
    }

    #[test]
    fn test_flatten_expanded_part_splices_children() {
        let flat = flatten(&outline(false));
        assert_eq!(ids(&flat), vec!["a", "y", "z", "x", "b"]);
    }

    #[test]
    fn test_flatten_collapsed_part_hides_children() {
        let source = outline(true);
        let flat = flatten(&source);
        assert_eq!(ids(&flat), vec!["a", "x", "b"]);

        // Hidden chapters are untouched
        assert_eq!(source.get("y").unwrap().index, 0);
        assert_eq!(source.get("z").unwrap().parent_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_flatten_with_depth_marks_children() {
        let items = flatten_with_depth(&outline(false));
        let depths: Vec<(&str, usize)> = items
            .iter()
            .map(|item| (item.node.id.as_str(), item.depth))
            .collect();
        assert_eq!(
            depths,
            vec![("a", 0), ("y", 1), ("z", 1), ("x", 0), ("b", 0)]
        );
    }

    #[test]
    fn test_flatten_empty_outline() {
        assert!(flatten(&Outline::new()).is_empty());
    }

    #[test]
    fn test_flatten_is_restartable() {
        let source = outline(false);
        assert_eq!(flatten(&source), flatten(&source));
    }

    #[test]
    fn test_flatten_shares_node_allocations() {
        let source = outline(false);
        let flat = flatten(&source);
        let original = source.get("y").unwrap();
        let row = flat.iter().find(|n| n.id == "y").unwrap();
        assert!(Arc::ptr_eq(original, row));
    }
}
