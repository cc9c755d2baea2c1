//! Geometric primitives for scene layout.
//!
//! This module provides the geometric types used throughout Tessel for
//! describing element positions, sizes, and bounding boxes.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in scene space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding/margin values for four sides
//!
//! # Coordinate System
//!
//! Scenes use the same coordinate system as the whiteboard editor they come
//! from, which matches SVG and CSS:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Coordinates are `f64` because editor documents store them as JSON doubles
//! and derived metrics are rounded from the exact values.

/// A 2D point representing a position in scene coordinate space.
///
/// # Examples
///
/// ```
/// # use tessel_core::geometry::Point;
/// let p = Point::new(10.0, 20.0);
///
/// assert_eq!(p.x(), 10.0);
/// assert!(p.is_finite());
/// assert!(!Point::new(f64::NAN, 0.0).is_finite());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns true if both coordinates are finite numbers
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns true if both dimensions are finite and not negative
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// A rectangular bounding box with minimum and maximum coordinates.
///
/// Two special values exist besides ordinary rectangles:
///
/// - [`Bounds::EMPTY`] covers nothing. Its minimums are `+inf` and its
///   maximums `-inf`, so merging any rectangle into it yields that rectangle.
/// - [`Bounds::ZERO`] is the degenerate rectangle at the origin, used where a
///   caller needs a neutral reference box rather than "no content".
///
/// # Examples
///
/// ```
/// # use tessel_core::geometry::{Bounds, Point, Size};
/// let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
///
/// assert_eq!(Bounds::EMPTY.merge(&a), a);
/// assert!(Bounds::EMPTY.is_empty());
/// assert!(!Bounds::ZERO.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Bounds of the empty set.
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// The zero-sized rectangle at the origin.
    pub const ZERO: Self = Self {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 0.0,
        max_y: 0.0,
    };

    /// Creates bounds from raw edge coordinates
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns true when the bounds cover no area at all, i.e. the minimum
    /// exceeds the maximum on either axis.
    ///
    /// [`Bounds::EMPTY`] is empty. A zero-sized rectangle such as
    /// [`Bounds::ZERO`] is not.
    pub fn is_empty(self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tessel_core::geometry::{Bounds, Point, Size};
    /// let header = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let content = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = header.merge(&content);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.min_y(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns the length of the overlap between the vertical extents of two
    /// bounds. Negative values are the size of the gap between them.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tessel_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
    /// let b = Bounds::new_from_top_left(Point::new(50.0, 5.0), Size::new(10.0, 10.0));
    /// let c = Bounds::new_from_top_left(Point::new(0.0, 40.0), Size::new(10.0, 10.0));
    ///
    /// assert_eq!(a.vertical_overlap(&b), 5.0);
    /// assert_eq!(a.vertical_overlap(&c), -30.0);
    /// ```
    pub fn vertical_overlap(&self, other: &Self) -> f64 {
        self.max_y.min(other.max_y) - self.min_y.max(other.min_y)
    }

    /// Returns the distance from each edge of `self` inward to the matching
    /// edge of `inner`.
    ///
    /// Sides where `inner` sticks out of `self` come out negative.
    pub fn insets_to(&self, inner: &Self) -> Insets {
        Insets {
            top: inner.min_y - self.min_y,
            right: self.max_x - inner.max_x,
            bottom: self.max_y - inner.max_y,
            left: inner.min_x - self.min_x,
        }
    }
}

/// Represents spacing around an element (padding, margin, etc.)
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f64 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f64 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f64 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f64 {
        self.left
    }

    /// Applies `f` to every side, returning the mapped insets
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
            left: f(self.left),
        }
    }
}
