#![forbid(unsafe_code)]

//! Error types for the core crate.

use std::fmt;

/// A placement string that is not one of the eight sides or four alt corners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlacementError {
    input: String,
}

impl ParsePlacementError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized placement {:?} (expected n, ne, e, se, s, sw, w, nw or a corner with -alt)",
            self.input
        )
    }
}

impl std::error::Error for ParsePlacementError {}
