#![forbid(unsafe_code)]

//! Elastic placement.
//!
//! A container whose size depends on where it sits (text wrapping at the
//! window edge, for instance) can change size once positioned, which makes
//! the computed coordinates stale. The iterator re-measures after each
//! placement and re-resolves until the size stops changing or the pass cap
//! is hit.
//!
//! # Invariants
//!
//! 1. At most `1 + ELASTIC_MAX_EXTRA_PASSES` resolve/apply passes.
//! 2. The returned coordinates are the last ones applied to the surface.
//! 3. A zero measurement on either axis is replaced by the default size.

use tipkit_core::{Coordinates, Placement, Rect, Size, ViewportState, resolve};

use crate::host::TipSurface;

/// Extra passes allowed after the first when the measured size keeps
/// changing.
pub const ELASTIC_MAX_EXTRA_PASSES: usize = 5;

/// Outcome of an elastic placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placed {
    /// Coordinates applied to the surface.
    pub coords: Coordinates,
    /// Size measured after the final pass (defaults substituted for zeros).
    pub size: Size,
    /// Resolve/apply passes performed.
    pub passes: usize,
}

/// Place `surface` at `placement` relative to `anchor`.
///
/// The surface is first parked at the document origin so its natural size
/// is not constrained by the previous position.
pub fn place<S: TipSurface + ?Sized>(
    surface: &mut S,
    anchor: &Rect,
    placement: Placement,
    default_size: Size,
    offset: f64,
    viewport: &ViewportState,
) -> Placed {
    surface.apply(&Coordinates::at(0.0, 0.0), viewport);

    let mut passes = 0;
    loop {
        let size = surface.outer_size().or_fallback(default_size);
        let coords = resolve(anchor, placement, size, offset, viewport);
        surface.apply(&coords, viewport);
        passes += 1;

        // Both sides have the default substituted, so a surface that always
        // measures zero settles after one pass.
        let measured = surface.outer_size().or_fallback(default_size);
        if measured == size || passes > ELASTIC_MAX_EXTRA_PASSES {
            tracing::trace!(
                side = %placement,
                passes,
                width = measured.width,
                height = measured.height,
                "elastic placement settled"
            );
            return Placed {
                coords,
                size: measured,
                passes,
            };
        }
    }
}
