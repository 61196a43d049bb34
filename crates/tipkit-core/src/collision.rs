#![forbid(unsafe_code)]

//! Viewport collision detection.
//!
//! # Comparison rules
//!
//! With visible rect `[vl, vr] x [vt, vb]`, window height `H`, and tip size
//! `w x h`, each flag is the OR of a near-edge and a far-edge test. A test
//! only participates when its edge is populated:
//!
//! | flag   | near edge          | far edge                   |
//! |--------|--------------------|----------------------------|
//! | TOP    | `top < vt`         | `abs(bottom - H) - h < vt` |
//! | BOTTOM | `top + h > vb`     | `abs(bottom - H) > vb`     |
//! | LEFT   | `left < vl`        | `right + w > vr`           |
//! | RIGHT  | `left + w > vr`    | `right < vl`               |
//!
//! `abs(bottom - H)` is the tip's bottom edge in document coordinates
//! whenever the tip sits above the window's bottom. The horizontal far-edge
//! terms are not a pure mirror of the near-edge terms once `scroll_left` is
//! non-zero; callers depend on these exact outcomes at the viewport edges.

use bitflags::bitflags;

use crate::coords::Coordinates;
use crate::geometry::Size;
use crate::viewport::ViewportState;

bitflags! {
    /// Viewport edges a candidate position would cross.
    ///
    /// The empty set means the tip fits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CollisionFlags: u8 {
        const TOP = 1;
        const BOTTOM = 2;
        const LEFT = 4;
        const RIGHT = 8;
    }
}

impl CollisionFlags {
    /// No collision.
    pub const NONE: CollisionFlags = CollisionFlags::empty();
}

/// Find the viewport edges a tip of `size` placed at `coords` would cross.
pub fn detect(coords: &Coordinates, size: Size, viewport: &ViewportState) -> CollisionFlags {
    let vp_top = viewport.scroll_top;
    let vp_left = viewport.scroll_left;
    let vp_bottom = vp_top + viewport.window_height;
    let vp_right = vp_left + viewport.window_width;
    let (w, h) = (size.width, size.height);

    // Tip bottom edge in document coordinates when anchored by `bottom`.
    let far_bottom = coords
        .bottom
        .map(|bottom| (bottom - viewport.window_height).abs());

    let mut flags = CollisionFlags::NONE;

    if coords.top.is_some_and(|top| top < vp_top) || far_bottom.is_some_and(|b| b - h < vp_top) {
        flags |= CollisionFlags::TOP;
    }
    if coords.top.is_some_and(|top| top + h > vp_bottom) || far_bottom.is_some_and(|b| b > vp_bottom)
    {
        flags |= CollisionFlags::BOTTOM;
    }
    if coords.left.is_some_and(|left| left < vp_left)
        || coords.right.is_some_and(|right| right + w > vp_right)
    {
        flags |= CollisionFlags::LEFT;
    }
    if coords.left.is_some_and(|left| left + w > vp_right)
        || coords.right.is_some_and(|right| right < vp_left)
    {
        flags |= CollisionFlags::RIGHT;
    }

    crate::trace!(bits = flags.bits(), "collision check");
    flags
}
