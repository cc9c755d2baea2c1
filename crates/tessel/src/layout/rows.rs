//! Row classification and segmentation.
//!
//! Siblings are split into rows by walking them in order and comparing each
//! node with the node processed just before it. Two neighbours share a row
//! when their vertical extents overlap by more than the threshold gap.
//!
//! Because only neighbours are compared, membership is not transitive and
//! depends on input order. A staircase of nodes where each one overlaps its
//! predecessor ends up in a single row even if the first and last nodes are
//! far apart vertically:
//!
//! ```text
//! ┌──┐
//! │a ├──┐
//! └──┤b ├──┐
//!    └──┤c │     one row: [a, b, c]
//!       └──┘
//! ```

use std::mem;

use log::trace;

use tessel_core::{geometry::Bounds, identifier::Id, scene::Element};

use crate::structure::{Group, Node};

/// A segmented node: an element, or a group together with its own rows.
#[derive(Debug, Clone, PartialEq)]
pub enum RowNode<'a> {
    Element(&'a Element),
    Group {
        group: &'a Group,
        rows: Vec<Row<'a>>,
    },
}

impl<'a> RowNode<'a> {
    /// Wraps a node, segmenting group children first.
    fn from_node(node: &'a Node, threshold_gap: f64) -> Self {
        match node {
            Node::Element(element) => Self::Element(element),
            Node::Group(group) => Self::Group {
                group,
                rows: split_into_rows(group.children(), threshold_gap),
            },
        }
    }

    pub fn id(&self) -> Id {
        match self {
            Self::Element(element) => element.id(),
            Self::Group { group, .. } => group.id(),
        }
    }

    /// Returns the node's bounding box, measured from descendants for groups.
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Element(element) => element.bounds(),
            Self::Group { group, .. } => super::compute_bounding_box_for_group(group),
        }
    }
}

/// An ordered run of siblings judged to share a horizontal band.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row<'a> {
    nodes: Vec<RowNode<'a>>,
}

impl<'a> Row<'a> {
    pub fn new(nodes: Vec<RowNode<'a>>) -> Self {
        Self { nodes }
    }

    /// Nodes in input order.
    pub fn nodes(&self) -> &[RowNode<'a>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Returns true if `a` and `b` overlap vertically by strictly more than
/// `threshold_gap`.
///
/// Touching nodes overlap by zero, so with a zero gap they start a new row.
pub fn are_in_same_row(a: &Node, b: &Node, threshold_gap: f64) -> bool {
    a.bounds().vertical_overlap(&b.bounds()) > threshold_gap
}

/// Splits siblings into rows, preserving input order within and across rows.
///
/// Group children are segmented recursively and carried in
/// [`RowNode::Group`]. A group is compared with its neighbours like any
/// other node, using the box of its descendants.
///
/// When the first sibling is a group, the result is a single row holding
/// only that group and the remaining siblings are not visited.
pub fn split_into_rows(children: &[Node], threshold_gap: f64) -> Vec<Row<'_>> {
    let Some(first) = children.first() else {
        return Vec::new();
    };

    if let Node::Group(group) = first {
        trace!(
            group_id:% = group.id(),
            skipped_siblings = children.len() - 1;
            "Leading group forms the only row"
        );
        return vec![Row::new(vec![RowNode::from_node(first, threshold_gap)])];
    }

    let (mut rows, current_row, _) = children.iter().fold(
        (Vec::new(), Vec::new(), None::<&Node>),
        |(mut rows, mut current_row, previous), child| {
            let row_node = RowNode::from_node(child, threshold_gap);
            if previous.is_some_and(|previous| !are_in_same_row(previous, child, threshold_gap)) {
                rows.push(Row::new(mem::take(&mut current_row)));
            }
            current_row.push(row_node);
            (rows, current_row, Some(child))
        },
    );
    rows.push(Row::new(current_row));

    trace!(children_count = children.len(), rows_count = rows.len(); "Split into rows");
    rows
}


#[cfg(test)]
mod proptest_tests {
    use std::ptr;

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
        let position = (0.0f64..500.0, 0.0f64..500.0);
        let size = (0.0f64..100.0, 0.0f64..100.0);
        (position, size).prop_map(|((x, y), (w, h))| rect_node(x, y, w, h))
    }

    /// The classifier gives the same answer regardless of argument order.
    fn check_same_row_is_symmetric(a: Node, b: Node, gap: f64) -> Result<(), TestCaseError> {
        prop_assert_eq!(are_in_same_row(&a, &b, gap), are_in_same_row(&b, &a, gap));
        Ok(())
    }

    /// Concatenating all rows gives back the input sequence.
    fn check_rows_partition_input(nodes: Vec<Node>, gap: f64) -> Result<(), TestCaseError> {
        let rows = split_into_rows(&nodes, gap);

        prop_assert!(rows.iter().all(|row| !row.is_empty()));
        let flattened: Vec<&Element> = rows
            .iter()
            .flat_map(|row| row.nodes())
            .filter_map(|node| match node {
                RowNode::Element(element) => Some(*element),
                RowNode::Group { .. } => None,
            })
            .collect();
        prop_assert_eq!(flattened.len(), nodes.len());
        for (element, node) in flattened.iter().zip(&nodes) {
            prop_assert!(matches!(node, Node::Element(expected) if ptr::eq(*element, expected)));
        }
        Ok(())
    }

    /// Consecutive nodes within a row always pass the classifier, and the
    /// first node of each row after the first fails it against its predecessor.
    fn check_row_boundaries(nodes: Vec<Node>, gap: f64) -> Result<(), TestCaseError> {
        let rows = split_into_rows(&nodes, gap);
        let mut index = 0;
        for (row_index, row) in rows.iter().enumerate() {
            for position in 0..row.len() {
                if index > 0 {
                    let joined = are_in_same_row(&nodes[index - 1], &nodes[index], gap);
                    let starts_row = position == 0 && row_index > 0;
                    prop_assert_eq!(joined, !starts_row);
                }
                index += 1;
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn same_row_is_symmetric(a in node_strategy(), b in node_strategy(), gap in 0.0f64..20.0) {
            check_same_row_is_symmetric(a, b, gap)?;
        }

        #[test]
        fn rows_partition_input(nodes in prop::collection::vec(node_strategy(), 1..30), gap in 0.0f64..20.0) {
            check_rows_partition_input(nodes, gap)?;
        }

        #[test]
        fn row_boundaries_follow_classifier(nodes in prop::collection::vec(node_strategy(), 1..30), gap in 0.0f64..20.0) {
            check_row_boundaries(nodes, gap)?;
        }
    }
}
