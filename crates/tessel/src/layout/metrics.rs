//! Derived metrics: rounding, frame padding and margins.
//!
//! Every pixel value that ends up in generated code goes through [`round`]
//! so output is deterministic across platforms.

use tessel_core::{geometry::Insets, scene::Element};

use crate::layout::{
    bounds::{compute_frame_bounding_box, compute_row_bounding_box},
    rows::{Row, RowNode},
};

/// Decimal places kept for emitted pixel metrics.
pub const METRIC_DECIMALS: u32 = 2;

/// Rounds `value` to `decimals` places as `round(value * 10^d) / 10^d`.
///
/// Ties round towards positive infinity, so `-0.125` becomes `-0.12`. The
/// scaling step is done in plain floating point: `1.005 * 100` is
/// `100.49999999999999`, so `round(1.005, 2)` is `1.0`.
///
/// # Examples
///
/// ```
/// # use tessel::layout::round;
/// assert_eq!(round(33.33333, 2), 33.33);
/// assert_eq!(round(0.125, 2), 0.13);
/// assert_eq!(round(1.005, 2), 1.0);
/// ```
pub fn round(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    round_half_up(value * factor) / factor
}

fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Returns the padding between a frame's edges and the box of its content.
///
/// `elements` is searched for elements whose `frameId` is the frame's id.
/// Returns `None` when the frame holds no elements.
pub fn compute_frame_padding(frame: &Element, elements: &[Element]) -> Option<Insets> {
    let content = compute_frame_bounding_box(frame.id(), elements);
    if content.is_empty() {
        return None;
    }

    Some(
        frame
            .bounds()
            .insets_to(&content)
            .map(|side| round(side, METRIC_DECIMALS)),
    )
}

/// Returns the horizontal gap between a node and its left neighbour in the
/// row.
///
/// For the first node of a row there is no neighbour and the node's own
/// `x` is returned.
pub fn compute_margin_left(node: &RowNode<'_>, sibling: Option<&RowNode<'_>>) -> f64 {
    let bounds = node.bounds();
    match sibling {
        Some(sibling) => round(bounds.min_x() - sibling.bounds().max_x(), METRIC_DECIMALS),
        None => round(bounds.min_x(), METRIC_DECIMALS),
    }
}

/// Returns the vertical gap between a row and the row above it.
///
/// The first row is measured against [`compute_row_bounding_box`] of no row,
/// the zero box, which makes its margin the row's own top edge.
pub fn compute_row_margin_top(row: &Row<'_>, previous: Option<&Row<'_>>) -> f64 {
    let top = compute_row_bounding_box(Some(row)).min_y();
    let previous_bottom = compute_row_bounding_box(previous).max_y();
    round(top - previous_bottom, METRIC_DECIMALS)
}
