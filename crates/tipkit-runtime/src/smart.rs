#![forbid(unsafe_code)]

//! Smart placement: walk a priority list until a candidate fits.

use tipkit_core::{CollisionFlags, Placement, Rect, Size, ViewportState, detect};

use crate::elastic::{self, Placed};
use crate::host::TipSurface;

/// The placement that was kept, with its final geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub placement: Placement,
    pub placed: Placed,
    /// Collisions of the kept placement; empty unless every candidate
    /// collided.
    pub collisions: CollisionFlags,
    /// Candidates tried, including the kept one.
    pub attempts: usize,
}

/// Try each candidate in order and keep the first with no collision.
///
/// Each candidate is placed elastically on the surface, so the surface ends
/// at the kept placement. If all collide the last candidate is kept. An
/// empty candidate list falls back to `fallback` alone.
pub fn select<S: TipSurface + ?Sized>(
    surface: &mut S,
    anchor: &Rect,
    candidates: &[Placement],
    fallback: Placement,
    default_size: Size,
    offset: f64,
    viewport: &ViewportState,
) -> Selection {
    if candidates.is_empty() {
        return single(surface, anchor, fallback, default_size, offset, viewport);
    }

    let mut selection = single(surface, anchor, candidates[0], default_size, offset, viewport);
    for (idx, &placement) in candidates.iter().enumerate().skip(1) {
        if selection.collisions.is_empty() {
            break;
        }
        selection = Selection {
            attempts: idx + 1,
            ..single(surface, anchor, placement, default_size, offset, viewport)
        };
    }
    selection
}

/// Place at `placement` with no fallback.
pub fn single<S: TipSurface + ?Sized>(
    surface: &mut S,
    anchor: &Rect,
    placement: Placement,
    default_size: Size,
    offset: f64,
    viewport: &ViewportState,
) -> Selection {
    let placed = elastic::place(surface, anchor, placement, default_size, offset, viewport);
    let collisions = detect(&placed.coords, placed.size, viewport);
    tracing::trace!(side = %placement, collisions = collisions.bits(), "candidate tried");
    Selection {
        placement,
        placed,
        collisions,
        attempts: 1,
    }
}
