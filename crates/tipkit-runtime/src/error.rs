#![forbid(unsafe_code)]

//! Runtime error type.

use std::fmt;

use tipkit_core::ParsePlacementError;

use crate::host::TargetId;

/// Errors surfaced by the public [`Registry`](crate::Registry) API.
///
/// Geometry and lifecycle code never fails; these cover caller mistakes
/// only.
#[derive(Debug)]
pub enum TipError {
    /// The target was never registered, or has been destroyed.
    UnknownTarget(TargetId),
    /// Options failed validation.
    Config(String),
    /// A placement string did not name a known placement.
    Placement(ParsePlacementError),
    /// An option document could not be decoded.
    #[cfg(feature = "serde")]
    Json(String),
}

impl fmt::Display for TipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipError::UnknownTarget(id) => write!(f, "unknown target {id}"),
            TipError::Config(msg) => write!(f, "invalid options: {msg}"),
            TipError::Placement(e) => write!(f, "{e}"),
            #[cfg(feature = "serde")]
            TipError::Json(msg) => write!(f, "option decode error: {msg}"),
        }
    }
}

impl std::error::Error for TipError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TipError::Placement(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParsePlacementError> for TipError {
    fn from(e: ParsePlacementError) -> Self {
        TipError::Placement(e)
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, TipError>;
