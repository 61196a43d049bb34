#![forbid(unsafe_code)]

//! tipkit runtime
//!
//! Drives tooltips through their show/hide lifecycle on top of the pure
//! geometry in `tipkit-core`.
//!
//! # Key Components
//!
//! - [`Registry`] - Context object: registration, public API, event intake
//! - [`Host`] / [`TipSurface`] - Seams to the embedding document
//! - [`Scheduler`] - Logical-time timer queue behind every delay
//! - [`elastic::place`] - Re-measuring placement for size-changing containers
//! - [`smart::select`] - Priority-list fallback when a placement collides
//! - [`HeadlessHost`] - In-memory host for tests and simulations
//!
//! # Time
//!
//! Nothing here reads a clock on its own. Call [`Registry::advance`] with a
//! logical step, or [`Registry::pump`] once per frame with the current
//! instant.

pub mod content;
pub mod display;
pub mod elastic;
pub mod error;
pub mod headless;
pub mod host;
pub mod options;
pub mod registry;
pub mod scheduler;
pub mod session;
pub mod smart;

pub use content::{ContentProvider, TipContent};
pub use display::{AnnotationInstance, Intent};
pub use elastic::{ELASTIC_MAX_EXTRA_PASSES, Placed};
pub use error::{Result, TipError};
pub use headless::{HeadlessHost, HeadlessSurface};
pub use host::{Host, TargetId, TipSurface};
pub use options::{DESYNC_POLL_INTERVAL, PreRenderHook, SHOW_RETRY_DELAY, TipOptions};
pub use registry::Registry;
pub use scheduler::{Scheduler, TimerId};
pub use session::{ScopedSession, TipPhase};
pub use smart::Selection;
