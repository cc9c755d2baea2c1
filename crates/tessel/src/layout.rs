//! Row layout engine.
//!
//! This module turns a node tree into rows and derives the geometry the
//! style layer needs to reproduce the scene with flow layout.
//!
//! # Pipeline Position
//!
//! ```text
//! Scene (flat elements)
//!     ↓ structure
//! SceneTree (nodes + frame index)
//!     ↓ layout (this module)
//! Rows + derived metrics
//!     ↓ style / export
//! Source text
//! ```
//!
//! # Submodules
//!
//! - [`bounds`] - Bounding boxes over nodes, frames and rows
//! - [`rows`] - Row classification and segmentation
//! - [`metrics`] - Rounding, frame padding and margins
//!
//! Everything here is a pure function of its arguments. The threshold gap is
//! passed in by the caller and never derived.

pub mod bounds;
pub mod metrics;
pub mod rows;

pub use bounds::{
    compute_bounding_box, compute_bounding_box_for_group, compute_frame_bounding_box,
    compute_row_bounding_box,
};
pub use metrics::{
    METRIC_DECIMALS, compute_frame_padding, compute_margin_left, compute_row_margin_top, round,
};
pub use rows::{Row, RowNode, are_in_same_row, split_into_rows};
