//! Outline Collection
//!
//! `Outline` is the full node collection the engine consumes and returns.
//! Nodes are held behind `Arc` so that an operation can hand back every node it
//! did not touch as the very same allocation. Rendering layers compare with
//! `Arc::ptr_eq` to skip unchanged rows.

use crate::models::OutlineNode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The complete set of outline nodes, in storage order.
///
/// Storage order carries no meaning; sibling order is defined by `index`.
/// Serializes as a plain JSON array of nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outline {
    nodes: Vec<Arc<OutlineNode>>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<OutlineNode>) -> Self {
        Self {
            nodes: nodes.into_iter().map(Arc::new).collect(),
        }
    }

    pub(crate) fn from_shared(nodes: Vec<Arc<OutlineNode>>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Arc<OutlineNode>] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<OutlineNode>> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<OutlineNode>> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Direct children of `parent` (`None` = top level), sorted by index.
    ///
    /// The sort is stable, so duplicate indices keep storage order.
    pub fn children_of(&self, parent: Option<&str>) -> Vec<Arc<OutlineNode>> {
        let mut children: Vec<Arc<OutlineNode>> = self
            .nodes
            .iter()
            .filter(|node| node.is_child_of(parent))
            .cloned()
            .collect();
        children.sort_by_key(|node| node.index);
        children
    }

    pub fn child_count(&self, parent: Option<&str>) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.is_child_of(parent))
            .count()
    }

    pub fn into_nodes(self) -> Vec<Arc<OutlineNode>> {
        self.nodes
    }
}

impl FromIterator<OutlineNode> for Outline {
    fn from_iter<I: IntoIterator<Item = OutlineNode>>(iter: I) -> Self {
        Self::from_nodes(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    fn sample() -> Outline {
        Outline::from_nodes(vec![
            OutlineNode::new_with_id("x", NodeKind::Chapter, "X", None, 1),
            OutlineNode::new_with_id("a", NodeKind::Part, "A", None, 0),
            OutlineNode::new_with_id("z", NodeKind::Chapter, "Z", Some("a".into()), 1),
            OutlineNode::new_with_id("y", NodeKind::Chapter, "Y", Some("a".into()), 0),
        ])
    }

    #[test]
    fn test_children_of_sorts_by_index() {
        let outline = sample();
        let top: Vec<String> = outline
            .children_of(None)
            .iter()
            .map(|n| n.id.clone())
            .collect();
        assert_eq!(top, vec!["a", "x"]);

        let ids: Vec<String> = outline
            .children_of(Some("a"))
            .iter()
            .map(|n| n.id.clone())
            .collect();
        assert_eq!(ids, vec!["y", "z"]);
    }

    #[test]
    fn test_get_and_counts() {
        let outline = sample();
        assert_eq!(outline.len(), 4);
        assert!(outline.contains("y"));
        assert!(outline.get("missing").is_none());
        assert_eq!(outline.child_count(Some("a")), 2);
        assert_eq!(outline.child_count(Some("x")), 0);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let outline = sample();
        let value = serde_json::to_value(&outline).unwrap();
        assert!(value.is_array());
        assert_eq!(value.as_array().unwrap().len(), 4);

        let back: Outline = serde_json::from_value(value).unwrap();
        assert_eq!(back, outline);
    }
}
