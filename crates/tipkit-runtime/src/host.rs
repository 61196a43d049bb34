#![forbid(unsafe_code)]

//! Host integration seams.
//!
//! The runtime never touches a document directly. A [`Host`] answers
//! questions about targets (where they are, whether they are disabled or
//! focused) and creates one [`TipSurface`] per popup id. A surface is the
//! single annotation container shared by every target using that popup id.
//!
//! Everything here is synchronous and single-threaded: the runtime calls in,
//! the host answers immediately.

use std::fmt;

use tipkit_core::{Coordinates, Placement, Rect, Size, ViewportState};

use crate::content::TipContent;

/// Opaque handle for a target element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(u64);

impl TargetId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for TargetId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// The annotation container.
pub trait TipSurface {
    /// Current outer size including borders and padding.
    ///
    /// May be zero when nothing is rendered yet; callers fall back to the
    /// configured default size per axis.
    fn outer_size(&self) -> Size;

    /// Position the surface. Unset edges are cleared.
    ///
    /// `viewport` is the state the coordinates were computed against; far
    /// edges (`bottom`, `right`) are relative to its window.
    fn apply(&mut self, coords: &Coordinates, viewport: &ViewportState);

    /// Current bounds in document coordinates.
    fn document_rect(&self) -> Rect;

    fn set_visible(&mut self, visible: bool);

    /// Remove all content.
    fn empty(&mut self);

    fn set_content(&mut self, content: TipContent);

    /// Record the placement that was kept, for placement-specific styling.
    fn set_placement(&mut self, _placement: Placement) {}

    /// Drop any placement-specific styling left from the previous show.
    fn reset_classes(&mut self) {}
}

/// The embedding environment.
pub trait Host {
    type Surface: TipSurface;

    /// Create the container for `popup_id`. Called once per id, the first
    /// time a target using it is registered.
    fn create_surface(&mut self, popup_id: &str) -> Self::Surface;

    /// Current bounds of `target` in document coordinates, or `None` if the
    /// target is no longer laid out.
    fn target_rect(&self, target: TargetId) -> Option<Rect>;

    fn is_disabled(&self, _target: TargetId) -> bool {
        false
    }

    fn has_focus(&self, _target: TargetId) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_id_display_and_conversion() {
        let id = TargetId::from(7);
        assert_eq!(id.get(), 7);
        assert_eq!(id.to_string(), "#7");
        assert_eq!(id, TargetId::new(7));
    }
}
