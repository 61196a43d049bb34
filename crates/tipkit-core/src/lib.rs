#![forbid(unsafe_code)]

//! Core: placement geometry, viewport collision detection, and pointer tracking.
//!
//! Everything here is pure data and pure functions. The runtime crate owns
//! timers, measurement and the show/hide state machine.

pub mod collision;
pub mod coords;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod placement;
pub mod resolve;
pub mod viewport;

pub use collision::{CollisionFlags, detect};
pub use coords::{Coordinates, Edges};
pub use error::ParsePlacementError;
pub use geometry::{Point, Rect, Size};
pub use placement::{Placement, Side};
pub use resolve::{CORNER_INSET, attachment_point, resolve};
pub use viewport::ViewportState;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};
