//! Core geometry types: Size, Region, Insets, Gap, Span, Weight, Alignment.
//!
//! These are the value records passed between the measure and arrange passes.
//! All lengths are integer pixels; fractional quantities go through
//! [`Fixed`](crate::fixed::Fixed) instead of floats.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in pixels (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum with `other`.
    #[inline]
    pub const fn max(self, other: Size) -> Size {
        Size {
            width: if self.width > other.width { self.width } else { other.width },
            height: if self.height > other.height { self.height } else { other.height },
        }
    }

    /// Grow the size outward by `insets`.
    #[inline]
    pub const fn expand(self, insets: Insets) -> Size {
        Size {
            width: self.width + insets.width(),
            height: self.height + insets.height(),
        }
    }

    /// Convert to a [`Region`] positioned at the origin.
    #[inline]
    pub const fn to_region(self) -> Region {
        Region { x: 0, y: 0, width: self.width, height: self.height }
    }
}

impl Add for Size {
    type Output = Size;
    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size { width: self.width + rhs.width, height: self.height + rhs.height }
    }
}

impl Sub for Size {
    type Output = Size;
    #[inline]
    fn sub(self, rhs: Size) -> Size {
        Size { width: self.width - rhs.width, height: self.height - rhs.height }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangle defined by position and size: the bounds written by the
/// arrange pass. Positions are relative to the parent's top-left corner.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Whether `other` overlaps this region (non-zero intersection area).
    #[inline]
    pub const fn overlaps(self, other: Region) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether `other` is entirely contained within this region.
    #[inline]
    pub const fn contains_region(self, other: Region) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Translate the region by `(dx, dy)`.
    #[inline]
    pub const fn translate(self, dx: i32, dy: i32) -> Region {
        Region { x: self.x + dx, y: self.y + dy, width: self.width, height: self.height }
    }

    /// Contract the region inward by the given [`Insets`].
    ///
    /// Width and height are clamped to zero to avoid negative dimensions.
    #[inline]
    pub const fn shrink(self, insets: Insets) -> Region {
        let w = self.width - insets.left - insets.right;
        let h = self.height - insets.top - insets.bottom;
        Region {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: if w > 0 { w } else { 0 },
            height: if h > 0 { h } else { 0 },
        }
    }
}

// ---------------------------------------------------------------------------
// Insets
// ---------------------------------------------------------------------------

/// Space between a widget's edge and its content area.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    /// Zero insets on all sides.
    pub const ZERO: Insets = Insets { top: 0, left: 0, right: 0, bottom: 0 };

    /// Create insets with explicit values for each side.
    #[inline]
    pub const fn new(top: i32, left: i32, right: i32, bottom: i32) -> Self {
        Self { top, left, right, bottom }
    }

    /// All four sides set to the same value.
    #[inline]
    pub const fn all(value: i32) -> Self {
        Self { top: value, left: value, right: value, bottom: value }
    }

    /// Symmetric insets: `vertical` for top/bottom, `horizontal` for left/right.
    #[inline]
    pub const fn symmetric(vertical: i32, horizontal: i32) -> Self {
        Self { top: vertical, left: horizontal, right: horizontal, bottom: vertical }
    }

    /// Total horizontal extent: `left + right`.
    #[inline]
    pub const fn width(self) -> i32 {
        self.left + self.right
    }

    /// Total vertical extent: `top + bottom`.
    #[inline]
    pub const fn height(self) -> i32 {
        self.top + self.bottom
    }
}

// ---------------------------------------------------------------------------
// Gap
// ---------------------------------------------------------------------------

/// Spacing inserted between consecutive table columns and rows.
///
/// Values are used literally; zero and negative gaps are accepted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gap {
    pub horizontal: i32,
    pub vertical: i32,
}

impl Gap {
    pub const ZERO: Gap = Gap { horizontal: 0, vertical: 0 };

    #[inline]
    pub const fn new(horizontal: i32, vertical: i32) -> Self {
        Self { horizontal, vertical }
    }
}

// ---------------------------------------------------------------------------
// Span
// ---------------------------------------------------------------------------

/// Number of table columns and rows a cell occupies. Both are at least 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    colspan: u32,
    rowspan: u32,
}

impl Span {
    /// A single cell.
    pub const ONE: Span = Span { colspan: 1, rowspan: 1 };

    /// Create a span, raising zero counts to 1.
    #[inline]
    pub const fn new(colspan: u32, rowspan: u32) -> Self {
        Self {
            colspan: if colspan == 0 { 1 } else { colspan },
            rowspan: if rowspan == 0 { 1 } else { rowspan },
        }
    }

    #[inline]
    pub const fn colspan(self) -> usize {
        self.colspan as usize
    }

    #[inline]
    pub const fn rowspan(self) -> usize {
        self.rowspan as usize
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::ONE
    }
}

// ---------------------------------------------------------------------------
// Weight
// ---------------------------------------------------------------------------

/// Relative share of leftover space per axis. Zero means "do not grow".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Weight {
    pub weightx: u32,
    pub weighty: u32,
}

impl Weight {
    pub const ZERO: Weight = Weight { weightx: 0, weighty: 0 };

    #[inline]
    pub const fn new(weightx: u32, weighty: u32) -> Self {
        Self { weightx, weighty }
    }
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// Placement of content along one axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    /// Offset that places `size` within `available` according to this alignment.
    ///
    /// The result is negative when `size` exceeds `available` and the
    /// alignment is not `Start`.
    #[inline]
    pub const fn offset(self, available: i32, size: i32) -> i32 {
        match self {
            Align::Start => 0,
            Align::Center => (available - size) / 2,
            Align::End => available - size,
        }
    }
}

/// Per-axis alignment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Alignment {
    pub horizontal: Align,
    pub vertical: Align,
}

impl Alignment {
    pub const START: Alignment = Alignment { horizontal: Align::Start, vertical: Align::Start };

    #[inline]
    pub const fn new(horizontal: Align, vertical: Align) -> Self {
        Self { horizontal, vertical }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
