//! Scenario tests for the outline engine
//!
//! Tests cover:
//! - Drag-and-drop moves within and across sibling groups
//! - Rejected drops returning the outline unchanged
//! - Cascade delete and gap closing
//! - Referential stability of untouched nodes

#[cfg(test)]
mod tests {
    use crate::models::{NodeKind, Outline, OutlineNode};
    use crate::outline::{
        delete_node, flatten, insert_chapter, move_node, toggle_collapsed, validate, DropPosition,
    };
    use std::sync::Arc;

    fn node(id: &str, kind: NodeKind, parent: Option<&str>, index: usize) -> OutlineNode {
        OutlineNode::new_with_id(id, kind, id.to_uppercase(), parent.map(str::to_string), index)
    }

    /// Top level: [Part A, Chapter X]; Part A: [Chapter Y]
    fn scenario() -> Outline {
        Outline::from_nodes(vec![
            node("a", NodeKind::Part, None, 0),
            node("x", NodeKind::Chapter, None, 1),
            node("y", NodeKind::Chapter, Some("a"), 0),
        ])
    }

    /// Top level: [c1, p1, c2, p2]; p1: [d1, d2, d3]; p2: [e1]
    fn manuscript() -> Outline {
        Outline::from_nodes(vec![
            node("c1", NodeKind::Chapter, None, 0),
            node("p1", NodeKind::Part, None, 1),
            node("c2", NodeKind::Chapter, None, 2),
            node("p2", NodeKind::Part, None, 3),
            node("d1", NodeKind::Chapter, Some("p1"), 0),
            node("d2", NodeKind::Chapter, Some("p1"), 1),
            node("d3", NodeKind::Chapter, Some("p1"), 2),
            node("e1", NodeKind::Chapter, Some("p2"), 0),
        ])
    }

    fn order(outline: &Outline, parent: Option<&str>) -> Vec<(String, usize)> {
        outline
            .children_of(parent)
            .iter()
            .map(|n| (n.id.clone(), n.index))
            .collect()
    }

    fn pairs(items: &[(&str, usize)]) -> Vec<(String, usize)> {
        items.iter().map(|(id, i)| (id.to_string(), *i)).collect()
    }

    #[test]
    fn test_drop_chapter_inside_part() {
        let outline = move_node(&scenario(), "x", "a", DropPosition::Inside);

        assert_eq!(order(&outline, None), pairs(&[("a", 0)]));
        assert_eq!(order(&outline, Some("a")), pairs(&[("y", 0), ("x", 1)]));
        assert!(validate(&outline).is_ok());
    }

    #[test]
    fn test_delete_part_with_child() {
        let source = scenario();
        let outline = delete_node(&source, "a");

        assert!(!outline.contains("a"));
        assert!(!outline.contains("y"));
        assert_eq!(outline.len(), 1);
        assert_eq!(outline.get("x").unwrap().index, 0);
        assert!(validate(&outline).is_ok());
    }

    #[test]
    fn test_reorder_within_group_forward_and_back() {
        let source = manuscript();

        let forward = move_node(&source, "d1", "d3", DropPosition::After);
        assert_eq!(
            order(&forward, Some("p1")),
            pairs(&[("d2", 0), ("d3", 1), ("d1", 2)])
        );

        let back = move_node(&forward, "d1", "d2", DropPosition::Before);
        assert_eq!(order(&back, Some("p1")), order(&source, Some("p1")));
        assert_eq!(back, source);
    }

    #[test]
    fn test_move_nested_chapter_to_top_level_closes_gap() {
        let outline = move_node(&manuscript(), "d2", "c1", DropPosition::Before);

        assert_eq!(
            order(&outline, None),
            pairs(&[("d2", 0), ("c1", 1), ("p1", 2), ("c2", 3), ("p2", 4)])
        );
        assert_eq!(order(&outline, Some("p1")), pairs(&[("d1", 0), ("d3", 1)]));
        assert!(outline.get("d2").unwrap().is_top_level());
        assert!(validate(&outline).is_ok());
    }

    #[test]
    fn test_move_between_parts() {
        let outline = move_node(&manuscript(), "e1", "d1", DropPosition::After);

        assert_eq!(
            order(&outline, Some("p1")),
            pairs(&[("d1", 0), ("e1", 1), ("d2", 2), ("d3", 3)])
        );
        assert!(order(&outline, Some("p2")).is_empty());
        assert!(validate(&outline).is_ok());
    }

    #[test]
    fn test_move_part_carries_children() {
        let source = manuscript();
        let outline = move_node(&source, "p2", "c1", DropPosition::Before);

        assert_eq!(
            order(&outline, None),
            pairs(&[("p2", 0), ("c1", 1), ("p1", 2), ("c2", 3)])
        );
        // Chapter under the moved part is untouched
        assert!(Arc::ptr_eq(source.get("e1").unwrap(), outline.get("e1").unwrap()));
        assert!(validate(&outline).is_ok());
    }

    #[test]
    fn test_move_only_rewrites_affected_groups() {
        let source = manuscript();
        let outline = move_node(&source, "d3", "d1", DropPosition::Before);

        // Top-level nodes and the other part's chapters keep their allocations
        for id in ["c1", "p1", "c2", "p2", "e1"] {
            assert!(
                Arc::ptr_eq(source.get(id).unwrap(), outline.get(id).unwrap()),
                "{id} should be shared"
            );
        }
        assert!(!Arc::ptr_eq(source.get("d3").unwrap(), outline.get("d3").unwrap()));
    }

    #[test]
    fn test_move_keeps_storage_order() {
        let source = manuscript();
        let outline = move_node(&source, "c2", "c1", DropPosition::Before);
        let before: Vec<&str> = source.iter().map(|n| n.id.as_str()).collect();
        let after: Vec<&str> = outline.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_rejected_drops_return_input() {
        let source = manuscript();
        let rejected = [
            move_node(&source, "c1", "c1", DropPosition::After),
            move_node(&source, "c1", "ghost", DropPosition::After),
            move_node(&source, "ghost", "c1", DropPosition::After),
            move_node(&source, "c1", "c2", DropPosition::Inside),
            move_node(&source, "p1", "p2", DropPosition::Inside),
            move_node(&source, "p2", "d2", DropPosition::Before),
        ];
        for outline in rejected {
            assert_eq!(outline, source);
            for original in source.iter() {
                assert!(Arc::ptr_eq(original, outline.get(&original.id).unwrap()));
            }
        }
    }

    #[test]
    fn test_same_position_drop_is_noop() {
        let source = manuscript();
        // d2 already sits right after d1
        let once = move_node(&source, "d2", "d1", DropPosition::After);
        let twice = move_node(&once, "d2", "d1", DropPosition::After);

        assert_eq!(once, source);
        assert_eq!(twice, once);
        assert!(Arc::ptr_eq(source.get("d2").unwrap(), once.get("d2").unwrap()));
    }

    #[test]
    fn test_drop_inside_current_parent_moves_to_end() {
        let outline = move_node(&manuscript(), "d1", "p1", DropPosition::Inside);
        assert_eq!(
            order(&outline, Some("p1")),
            pairs(&[("d2", 0), ("d3", 1), ("d1", 2)])
        );
    }

    #[test]
    fn test_drop_inside_collapsed_part_hides_chapter() {
        let collapsed = toggle_collapsed(&manuscript(), "p2");
        let outline = move_node(&collapsed, "c2", "p2", DropPosition::Inside);

        let flat = flatten(&outline);
        assert!(!flat.iter().any(|n| n.id == "c2"));
        assert_eq!(order(&outline, Some("p2")), pairs(&[("e1", 0), ("c2", 1)]));
    }

    #[test]
    fn test_insert_then_move_into_new_part() {
        let (outline, chapter) = insert_chapter(&manuscript(), None, Some("Coda"));
        let chapter = chapter.unwrap();
        let outline = move_node(&outline, &chapter, "p2", DropPosition::Inside);

        assert_eq!(
            order(&outline, Some("p2")),
            pairs(&[("e1", 0), (chapter.as_str(), 1)])
        );
        assert!(validate(&outline).is_ok());
    }
}
