#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle describing a subregion request within a parent region.
///
/// Uses terminal coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if `other` fits entirely within this rectangle.
    #[inline]
    pub const fn encloses(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// One dimension of a panel's configured maximum size.
///
/// Replaces the conventional `-1` sentinel: a panel either caps a dimension
/// at a fixed cell count or fills whatever space its parent has left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extent {
    /// Use all available space.
    #[default]
    Fill,
    /// Cap at this many cells (still clamped to available space).
    Cells(u16),
}

impl Extent {
    /// Resolve against the space the parent currently has available.
    #[inline]
    pub const fn clamp_to(self, available: u16) -> u16 {
        match self {
            Self::Fill => available,
            Self::Cells(n) => {
                if n < available {
                    n
                } else {
                    available
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Extent, Rect};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 3));
        assert!(!rect.contains(2, 8));
    }

    #[test]
    fn rect_right_bottom_saturate() {
        let rect = Rect::new(u16::MAX - 2, u16::MAX - 2, 100, 100);
        assert_eq!(rect.right(), u16::MAX);
        assert_eq!(rect.bottom(), u16::MAX);
    }

    #[test]
    fn rect_is_empty() {
        assert!(Rect::new(0, 0, 0, 10).is_empty());
        assert!(Rect::new(0, 0, 10, 0).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn rect_encloses() {
        let outer = Rect::new(0, 0, 10, 10);
        assert!(outer.encloses(&Rect::new(2, 2, 3, 3)));
        assert!(outer.encloses(&outer));
        assert!(!outer.encloses(&Rect::new(8, 8, 4, 4)));
    }

    #[test]
    fn extent_fill_uses_available() {
        assert_eq!(Extent::Fill.clamp_to(42), 42);
        assert_eq!(Extent::Fill.clamp_to(0), 0);
    }

    #[test]
    fn extent_cells_clamps() {
        assert_eq!(Extent::Cells(10).clamp_to(42), 10);
        assert_eq!(Extent::Cells(10).clamp_to(4), 4);
    }

    #[test]
    fn extent_default_is_fill() {
        assert_eq!(Extent::default(), Extent::Fill);
    }
}
