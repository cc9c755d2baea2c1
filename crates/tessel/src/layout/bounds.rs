//! Bounding boxes over nodes, frames and rows.
//!
//! All variants accumulate a running min/max starting from
//! [`Bounds::EMPTY`]. They differ in what an empty input means:
//!
//! | function                          | empty input        |
//! |-----------------------------------|--------------------|
//! | [`compute_bounding_box`]          | [`Bounds::EMPTY`]  |
//! | [`compute_bounding_box_for_group`]| [`Bounds::EMPTY`]  |
//! | [`compute_frame_bounding_box`]    | [`Bounds::EMPTY`]  |
//! | [`compute_row_bounding_box`]      | [`Bounds::ZERO`]   |
//!
//! The row variant returns the zero box so that the first row of a container
//! measures its offset from the origin. Callers of the other variants must
//! check [`Bounds::is_empty`] before using the result as a rectangle.

use tessel_core::{geometry::Bounds, identifier::Id, scene::Element};

use crate::{
    layout::rows::Row,
    structure::{Group, Node},
};

/// Returns the union of the nodes' boxes.
///
/// Groups are measured by descending into their children, never from any
/// stored geometry.
pub fn compute_bounding_box(nodes: &[Node]) -> Bounds {
    nodes.iter().fold(Bounds::EMPTY, |acc, node| {
        let node_bounds = match node {
            Node::Element(element) => element.bounds(),
            Node::Group(group) => compute_bounding_box_for_group(group),
        };
        acc.merge(&node_bounds)
    })
}

/// Returns the union of all descendants of a group.
pub fn compute_bounding_box_for_group(group: &Group) -> Bounds {
    compute_bounding_box(group.children())
}

/// Returns the union of the elements whose `frameId` equals `frame_id`.
///
/// `elements` may be the whole flat element list; elements of other frames
/// and unframed elements are ignored.
pub fn compute_frame_bounding_box(frame_id: Id, elements: &[Element]) -> Bounds {
    elements
        .iter()
        .filter(|element| element.frame_id() == Some(frame_id))
        .fold(Bounds::EMPTY, |acc, element| acc.merge(&element.bounds()))
}

/// Returns the union of a row's nodes, or [`Bounds::ZERO`] when there is no
/// row or it holds no nodes.
pub fn compute_row_bounding_box(row: Option<&Row<'_>>) -> Bounds {
    match row {
        Some(row) if !row.is_empty() => row
            .nodes()
            .iter()
            .fold(Bounds::EMPTY, |acc, node| acc.merge(&node.bounds())),
        _ => Bounds::ZERO,
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use tessel_core::{
        geometry::{Point, Size},
        scene::ElementKind,
    };

    use super::*;

    fn rect_node(x: f64, y: f64, w: f64, h: f64) -> Node {
        Node::Element(Element::new(
            "prop",
            ElementKind::Rectangle,
            Point::new(x, y),
            Size::new(w, h),
        ))
    }

    fn node_strategy() -> impl Strategy<Value = Node> {
        let position = (-1000.0f64..1000.0, -1000.0f64..1000.0);
        let size = (0.0f64..500.0, 0.0f64..500.0);
        (position, size).prop_map(|((x, y), (w, h))| rect_node(x, y, w, h))
    }

    /// A nonempty box is well-formed and equals the union of the node boxes.
    fn check_bounding_box_is_union(nodes: Vec<Node>) -> Result<(), TestCaseError> {
        let bounds = compute_bounding_box(&nodes);

        prop_assert!(bounds.min_x() <= bounds.max_x());
        prop_assert!(bounds.min_y() <= bounds.max_y());

        let union = nodes
            .iter()
            .map(Node::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds));
        prop_assert_eq!(Some(bounds), union);
        Ok(())
    }

    /// Wrapping nodes in a group does not change their box.
    fn check_group_matches_children(nodes: Vec<Node>) -> Result<(), TestCaseError> {
        let flat = compute_bounding_box(&nodes);
        let group = Group::new(Id::new("prop-group"), nodes);

        prop_assert_eq!(compute_bounding_box_for_group(&group), flat);
        Ok(())
    }

    proptest! {
        #[test]
        fn bounding_box_is_union(nodes in prop::collection::vec(node_strategy(), 1..20)) {
            check_bounding_box_is_union(nodes)?;
        }

        #[test]
        fn group_matches_children(nodes in prop::collection::vec(node_strategy(), 1..20)) {
            check_group_matches_children(nodes)?;
        }
    }
}
