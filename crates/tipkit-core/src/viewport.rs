#![forbid(unsafe_code)]

//! Viewport and pointer tracking.
//!
//! [`ViewportState`] is the live snapshot that placement and collision code
//! read: where the pointer is in document coordinates, the previous pointer
//! sample used for hover intent, the scroll offsets, and the window size.
//! It is updated in place by whatever forwards pointer, scroll and resize
//! events.

use crate::geometry::{Point, Rect, Size};

/// Pointer, scroll and window state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportState {
    /// Current pointer position (document coordinates).
    pub pointer: Point,
    /// Pointer sample from the last hover-intent check.
    pub previous_pointer: Point,
    pub scroll_top: f64,
    pub scroll_left: f64,
    pub window_width: f64,
    pub window_height: f64,
}

impl ViewportState {
    /// Create a tracker for an unscrolled window of the given size.
    #[must_use]
    pub fn new(window: Size) -> Self {
        Self {
            window_width: window.width,
            window_height: window.height,
            ..Self::default()
        }
    }

    /// Window size.
    #[inline]
    pub fn window(&self) -> Size {
        Size::new(self.window_width, self.window_height)
    }

    /// The visible part of the document.
    #[inline]
    pub fn visible_rect(&self) -> Rect {
        Rect::new(
            self.scroll_left,
            self.scroll_top,
            self.window_width,
            self.window_height,
        )
    }

    /// Record a pointer move (document coordinates).
    pub fn track_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// Record a pointer move and reset the intent baseline to it.
    ///
    /// Used when a hover begins: intent is measured from where it started.
    pub fn begin_intent(&mut self, pointer: Point) {
        self.pointer = pointer;
        self.previous_pointer = pointer;
    }

    /// Move the intent baseline to the current pointer position.
    pub fn resample_intent(&mut self) {
        self.previous_pointer = self.pointer;
    }

    /// Manhattan distance the pointer travelled since the last intent sample.
    #[inline]
    pub fn intent_travel(&self) -> f64 {
        self.pointer.manhattan(self.previous_pointer)
    }

    /// Record a window resize.
    pub fn resize(&mut self, window: Size) {
        crate::trace!(
            width = window.width,
            height = window.height,
            "viewport resized"
        );
        self.window_width = window.width;
        self.window_height = window.height;
    }

    /// Record a scroll.
    ///
    /// The pointer does not move on screen while the document scrolls under
    /// it, so its document coordinates shift by the scroll delta.
    pub fn scroll_to(&mut self, scroll_left: f64, scroll_top: f64) {
        if scroll_left != self.scroll_left {
            self.pointer.x += scroll_left - self.scroll_left;
            self.scroll_left = scroll_left;
        }
        if scroll_top != self.scroll_top {
            self.pointer.y += scroll_top - self.scroll_top;
            self.scroll_top = scroll_top;
        }
        crate::trace!(scroll_left, scroll_top, "viewport scrolled");
    }

    /// Whether the pointer is over `rect`.
    #[inline]
    pub fn pointer_over(&self, rect: &Rect) -> bool {
        rect.contains(self.pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ViewportState {
        ViewportState::new(Size::new(800.0, 600.0))
    }

    #[test]
    fn new_is_unscrolled() {
        let vp = viewport();
        assert_eq!(vp.visible_rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(vp.window(), Size::new(800.0, 600.0));
    }

    #[test]
    fn scroll_shifts_pointer_by_delta() {
        let mut vp = viewport();
        vp.track_pointer(Point::new(100.0, 100.0));
        vp.scroll_to(0.0, 250.0);
        assert_eq!(vp.pointer, Point::new(100.0, 350.0));
        vp.scroll_to(30.0, 200.0);
        assert_eq!(vp.pointer, Point::new(130.0, 300.0));
        assert_eq!(vp.visible_rect(), Rect::new(30.0, 200.0, 800.0, 600.0));
    }

    #[test]
    fn scroll_to_same_offsets_is_noop() {
        let mut vp = viewport();
        vp.track_pointer(Point::new(5.0, 5.0));
        vp.scroll_to(0.0, 0.0);
        assert_eq!(vp.pointer, Point::new(5.0, 5.0));
    }

    #[test]
    fn intent_travel_measures_from_baseline() {
        let mut vp = viewport();
        vp.begin_intent(Point::new(10.0, 10.0));
        assert_eq!(vp.intent_travel(), 0.0);
        vp.track_pointer(Point::new(13.0, 6.0));
        assert_eq!(vp.intent_travel(), 7.0);
        vp.resample_intent();
        assert_eq!(vp.intent_travel(), 0.0);
    }

    #[test]
    fn resize_updates_window() {
        let mut vp = viewport();
        vp.resize(Size::new(1024.0, 768.0));
        assert_eq!(vp.window_width, 1024.0);
        assert_eq!(vp.window_height, 768.0);
    }

    #[test]
    fn pointer_over_uses_document_coordinates() {
        let mut vp = viewport();
        vp.track_pointer(Point::new(120.0, 105.0));
        assert!(vp.pointer_over(&Rect::new(100.0, 100.0, 50.0, 20.0)));
        assert!(!vp.pointer_over(&Rect::new(0.0, 0.0, 50.0, 20.0)));
    }
}
