//! Geometry primitives shared by layouts and animations.
//!
//! All values are **logical points**, the same unit the host collection view
//! uses for its item frames. Conversion to physical pixels is a host concern.

use serde::{Deserialize, Serialize};

// ============================================================================
// Size
// ============================================================================

/// Two-dimensional size expressed in points.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Size {
    /// The width in points.
    pub width: f32,
    /// The height in points.
    pub height: f32,
}

impl Size {
    /// Constructs a [`Size`] with the given `width` and `height`.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Creates a [`Size`] with zero width and height.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// Returns true if both dimensions are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Returns true if both sizes have bit-for-bit identical dimensions.
    ///
    /// Unlike `==`, a size holding NaN is identical to itself.
    #[must_use]
    pub const fn is_identical_to(&self, other: &Self) -> bool {
        self.width.to_bits() == other.width.to_bits()
            && self.height.to_bits() == other.height.to_bits()
    }

    /// Replaces non-finite or negative dimensions with zero.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let clean = |value: f32| if value.is_finite() && value > 0.0 { value } else { 0.0 };
        Self::new(clean(self.width), clean(self.height))
    }
}

// ============================================================================
// Point
// ============================================================================

/// Coordinate relative to the content origin of the collection view.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// The x-coordinate in points.
    pub x: f32,
    /// The y-coordinate in points.
    pub y: f32,
}

impl Point {
    /// Constructs a [`Point`] at the given `x` and `y`.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a [`Point`] at the origin (0, 0).
    #[must_use]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

// ============================================================================
// Rect
// ============================================================================

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    origin: Point,
    size: Size,
}

impl Rect {
    /// Creates a new [`Rect`] with the provided `origin` and `size`.
    #[must_use]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Creates a rectangle from origin (0, 0) with the given size.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self {
            origin: Point::zero(),
            size,
        }
    }

    /// Returns the rectangle's origin (top-left corner).
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the rectangle's size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Returns the rectangle's x-coordinate (left edge).
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.origin.x
    }

    /// Returns the rectangle's y-coordinate (top edge).
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.origin.y
    }

    /// Returns the rectangle's width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.size.width
    }

    /// Returns the rectangle's height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.size.height
    }

    /// Returns the maximum x-coordinate (right edge).
    #[must_use]
    pub const fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Returns the maximum y-coordinate (bottom edge).
    #[must_use]
    pub const fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Returns a copy moved to `origin`, keeping the size.
    #[must_use]
    pub const fn with_origin(self, origin: Point) -> Self {
        Self {
            origin,
            size: self.size,
        }
    }

    /// Returns a copy with the given size, keeping the origin.
    #[must_use]
    pub const fn with_size(self, size: Size) -> Self {
        Self {
            origin: self.origin,
            size,
        }
    }

    /// Returns a copy translated by `dx`, `dy`.
    #[must_use]
    pub const fn offset_by(self, dx: f32, dy: f32) -> Self {
        Self {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: self.size,
        }
    }

    /// Returns true if the interiors of both rectangles overlap.
    ///
    /// Rectangles that only share an edge, and empty rectangles, never
    /// intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x() < other.max_x()
            && other.x() < self.max_x()
            && self.y() < other.max_y()
            && other.y() < self.max_y()
    }

    /// Returns true if the vertical extents of both rectangles overlap.
    #[must_use]
    pub fn overlaps_vertically(&self, other: &Self) -> bool {
        self.y() < other.max_y() && other.y() < self.max_y()
    }
}

// ============================================================================
// Tests
// ============================================================================
