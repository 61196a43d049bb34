#![forbid(unsafe_code)]

//! Geometric primitives in document coordinates.
//!
//! All values are CSS pixels relative to the top-left corner of the
//! document (not the viewport). Fractional values are kept as-is; rounding
//! is left to whatever applies the position.

/// A point in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another point.
    #[inline]
    pub fn manhattan(&self, other: Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Translate by the given deltas.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[f64; 2]", into = "[f64; 2]"))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Replace each zero dimension with the matching dimension of `fallback`.
    ///
    /// An element that has never been rendered measures as zero; placement
    /// math then runs against `fallback` for that axis instead.
    #[inline]
    #[must_use]
    pub fn or_fallback(self, fallback: Size) -> Size {
        Size {
            width: if self.width == 0.0 {
                fallback.width
            } else {
                self.width
            },
            height: if self.height == 0.0 {
                fallback.height
            } else {
                self.height
            },
        }
    }
}

impl From<[f64; 2]> for Size {
    fn from([width, height]: [f64; 2]) -> Self {
        Self::new(width, height)
    }
}

impl From<Size> for [f64; 2] {
    fn from(size: Size) -> Self {
        [size.width, size.height]
    }
}

/// An axis-aligned box in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle from its left/top corner and size.
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Size of the rectangle.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Check if a point is over the rectangle.
    ///
    /// All four edges are inclusive, so a pointer resting exactly on the
    /// border of a target still counts as hovering it.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Check whether `other` lies entirely inside this rectangle.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect, Size};

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn rect_contains_is_edge_inclusive() {
        let r = Rect::new(0.0, 0.0, 5.0, 5.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(5.0, 5.0)));
        assert!(!r.contains(Point::new(5.1, 0.0)));
        assert!(!r.contains(Point::new(0.0, -0.1)));
    }

    #[test]
    fn rect_contains_rect() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 90.0, 90.0)));
        assert!(outer.contains_rect(&outer));
        assert!(!outer.contains_rect(&Rect::new(-1.0, 10.0, 20.0, 20.0)));
        assert!(!outer.contains_rect(&Rect::new(90.0, 90.0, 20.0, 5.0)));
    }

    #[test]
    fn rect_is_empty() {
        assert!(Rect::default().is_empty());
        assert!(Rect::new(5.0, 5.0, 0.0, 10.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn size_fallback_is_per_axis() {
        let fallback = Size::new(260.0, 120.0);
        assert_eq!(Size::default().or_fallback(fallback), fallback);
        assert_eq!(
            Size::new(80.0, 0.0).or_fallback(fallback),
            Size::new(80.0, 120.0)
        );
        assert_eq!(
            Size::new(80.0, 30.0).or_fallback(fallback),
            Size::new(80.0, 30.0)
        );
    }

    #[test]
    fn point_manhattan() {
        let a = Point::new(1.0, 1.0);
        assert_eq!(a.manhattan(Point::new(4.0, -3.0)), 7.0);
        assert_eq!(a.manhattan(a), 0.0);
        assert_eq!(a.offset(2.0, -1.0), Point::new(3.0, 0.0));
    }

    #[test]
    fn size_array_conversions() {
        let s = Size::from([260.0, 120.0]);
        assert_eq!(s, Size::new(260.0, 120.0));
        assert_eq!(<[f64; 2]>::from(s), [260.0, 120.0]);
    }
}
