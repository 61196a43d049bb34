#![forbid(unsafe_code)]

//! Geometry resolver: where a tip goes for a given placement.
//!
//! Pure functions. The anchor's attachment point is the midpoint of the
//! relevant edge (cardinal sides) or the corner itself (corner sides). The
//! tip is then offset so its own edge sits `offset` pixels away. Cardinal
//! placements center the tip along the perpendicular axis; corner placements
//! put the tip's edge [`CORNER_INSET`] pixels past the corner, so the tip
//! overlaps the target slightly. Alt corners grow the other way with no
//! inset.
//!
//! North- and west-facing placements are expressed through the far edges
//! (`bottom`, `right`), so a tip whose size changes stays glued to the target.

use crate::coords::Coordinates;
use crate::geometry::{Point, Rect, Size};
use crate::placement::{Placement, Side};
use crate::viewport::ViewportState;

/// Horizontal overlap between a corner-placed tip and its target.
pub const CORNER_INSET: f64 = 20.0;

/// Attachment point on `anchor` for `side`.
pub fn attachment_point(anchor: &Rect, side: Side) -> Point {
    let mid_x = anchor.left + anchor.width / 2.0;
    let mid_y = anchor.top + anchor.height / 2.0;
    match side {
        Side::N => Point::new(mid_x, anchor.top),
        Side::E => Point::new(anchor.right(), mid_y),
        Side::S => Point::new(mid_x, anchor.bottom()),
        Side::W => Point::new(anchor.left, mid_y),
        Side::NW => Point::new(anchor.left, anchor.top),
        Side::NE => Point::new(anchor.right(), anchor.top),
        Side::SW => Point::new(anchor.left, anchor.bottom()),
        Side::SE => Point::new(anchor.right(), anchor.bottom()),
    }
}

/// Compute tip coordinates for `placement` against `anchor`.
///
/// `tip` is the measured tip size; `viewport` supplies the window size used
/// for far-edge (`bottom`/`right`) values.
pub fn resolve(
    anchor: &Rect,
    placement: Placement,
    tip: Size,
    offset: f64,
    viewport: &ViewportState,
) -> Coordinates {
    let p = attachment_point(anchor, placement.side());
    let win_w = viewport.window_width;
    let win_h = viewport.window_height;
    let c = Coordinates::EMPTY;

    match (placement.side(), placement.is_alt()) {
        (Side::N, _) => c
            .with_left(p.x - tip.width / 2.0)
            .with_bottom(win_h - p.y + offset),
        (Side::E, _) => c
            .with_left(p.x + offset)
            .with_top(p.y - tip.height / 2.0),
        (Side::S, _) => c
            .with_left(p.x - tip.width / 2.0)
            .with_top(p.y + offset),
        (Side::W, _) => c
            .with_top(p.y - tip.height / 2.0)
            .with_right(win_w - p.x + offset),
        (Side::NW, false) => c
            .with_bottom(win_h - p.y + offset)
            .with_right(win_w - p.x - CORNER_INSET),
        (Side::NE, false) => c
            .with_left(p.x - CORNER_INSET)
            .with_bottom(win_h - p.y + offset),
        (Side::SW, false) => c
            .with_top(p.y + offset)
            .with_right(win_w - p.x - CORNER_INSET),
        (Side::SE, false) => c.with_left(p.x - CORNER_INSET).with_top(p.y + offset),
        (Side::NW, true) => c.with_left(p.x).with_bottom(win_h - p.y + offset),
        (Side::NE, true) => c.with_bottom(win_h - p.y + offset).with_right(win_w - p.x),
        (Side::SW, true) => c.with_left(p.x).with_top(p.y + offset),
        (Side::SE, true) => c.with_top(p.y + offset).with_right(win_w - p.x),
    }
}
