#![forbid(unsafe_code)]

//! Sparse CSS-style positioning.
//!
//! [`Coordinates`] holds up to four edge offsets. Per axis, a placement
//! populates either the near edge (`top`/`left`, measured from the document
//! origin) or the far edge (`bottom`/`right`, measured from the far side of
//! the window). Unset edges are left for the layout engine to resolve.

use bitflags::bitflags;

use crate::geometry::{Rect, Size};

bitflags! {
    /// Which edges of a [`Coordinates`] value are populated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Edges: u8 {
        const TOP = 0b0001;
        const LEFT = 0b0010;
        const RIGHT = 0b0100;
        const BOTTOM = 0b1000;
    }
}

/// Edge offsets for an absolutely positioned tip.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
}

impl Coordinates {
    /// No edges populated.
    pub const EMPTY: Coordinates = Coordinates {
        top: None,
        left: None,
        right: None,
        bottom: None,
    };

    /// Position by the top-left corner.
    #[inline]
    pub const fn at(top: f64, left: f64) -> Self {
        Self {
            top: Some(top),
            left: Some(left),
            right: None,
            bottom: None,
        }
    }

    /// Set the top edge.
    #[inline]
    #[must_use]
    pub const fn with_top(mut self, value: f64) -> Self {
        self.top = Some(value);
        self
    }

    /// Set the left edge.
    #[inline]
    #[must_use]
    pub const fn with_left(mut self, value: f64) -> Self {
        self.left = Some(value);
        self
    }

    /// Set the right edge.
    #[inline]
    #[must_use]
    pub const fn with_right(mut self, value: f64) -> Self {
        self.right = Some(value);
        self
    }

    /// Set the bottom edge.
    #[inline]
    #[must_use]
    pub const fn with_bottom(mut self, value: f64) -> Self {
        self.bottom = Some(value);
        self
    }

    /// The set of populated edges.
    pub fn edges(&self) -> Edges {
        let mut edges = Edges::empty();
        edges.set(Edges::TOP, self.top.is_some());
        edges.set(Edges::LEFT, self.left.is_some());
        edges.set(Edges::RIGHT, self.right.is_some());
        edges.set(Edges::BOTTOM, self.bottom.is_some());
        edges
    }

    /// Check if no edge is populated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges().is_empty()
    }

    /// Resolve to a document rectangle for a tip of `size` in a window of
    /// `window` dimensions.
    ///
    /// The near edge wins when both are present on an axis. Far edges are
    /// mirrored across the window: `left = window.width - right - width`.
    /// Returns `None` when an axis has neither edge.
    pub fn to_rect(&self, size: Size, window: Size) -> Option<Rect> {
        let left = match (self.left, self.right) {
            (Some(left), _) => left,
            (None, Some(right)) => window.width - right - size.width,
            (None, None) => return None,
        };
        let top = match (self.top, self.bottom) {
            (Some(top), _) => top,
            (None, Some(bottom)) => window.height - bottom - size.height,
            (None, None) => return None,
        };
        Some(Rect::new(left, top, size.width, size.height))
    }
}
