#![forbid(unsafe_code)]

//! tipkit public facade crate.
//!
//! Re-exports the geometry types from `tipkit-core` and the lifecycle
//! runtime from `tipkit-runtime`, and offers a small prelude for hosts that
//! embed a [`Registry`].
//!
//! ```
//! use tipkit::prelude::*;
//!
//! let mut host = HeadlessHost::new(Size::new(80.0, 30.0));
//! let target = TargetId::new(1);
//! host.set_target(target, Rect::new(100.0, 100.0, 50.0, 20.0));
//!
//! let mut registry = Registry::new(host, Size::new(800.0, 600.0));
//! registry.register(target, TipOptions::default(), TipContent::from("Save"))?;
//! registry.show(target, None)?;
//! assert_eq!(registry.phase("tooltip"), TipPhase::Shown);
//! # Ok::<(), tipkit::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use tipkit_core::{
    CORNER_INSET, CollisionFlags, Coordinates, Edges, ParsePlacementError, Placement, Point, Rect,
    Side, Size, ViewportState,
};

// --- Runtime re-exports ----------------------------------------------------

pub use tipkit_runtime::{
    ContentProvider, DESYNC_POLL_INTERVAL, ELASTIC_MAX_EXTRA_PASSES, HeadlessHost, HeadlessSurface,
    Host, PreRenderHook, Registry, SHOW_RETRY_DELAY, Selection, TargetId, TipContent, TipError,
    TipOptions, TipPhase, TipSurface,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for tipkit hosts.
#[derive(Debug)]
pub enum Error {
    /// Registry or option error.
    Tip(TipError),
    /// Reading an option file failed.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tip(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tip(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<TipError> for Error {
    fn from(err: TipError) -> Self {
        Self::Tip(err)
    }
}

impl From<ParsePlacementError> for Error {
    fn from(err: ParsePlacementError) -> Self {
        Self::Tip(TipError::Placement(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for tipkit APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Read and validate a JSON option file.
#[cfg(feature = "serde")]
pub fn load_options(path: impl AsRef<std::path::Path>) -> Result<TipOptions> {
    let json = std::fs::read_to_string(path)?;
    Ok(TipOptions::from_json_str(&json)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ContentProvider, Error, HeadlessHost, Host, Placement, Point, Rect, Registry, Result,
        Side, Size, TargetId, TipContent, TipOptions, TipPhase, TipSurface,
    };

    pub use crate::{core, runtime};
}

pub use tipkit_core as core;
pub use tipkit_runtime as runtime;
