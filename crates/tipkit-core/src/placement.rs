#![forbid(unsafe_code)]

//! Compass placements and their smart-placement priority lists.
//!
//! A [`Placement`] is one of the eight [`Side`]s, optionally with the `alt`
//! modifier. Only the four corners accept `alt`; it flips which way the tip
//! grows horizontally from the corner.

use std::fmt;
use std::str::FromStr;

use crate::error::ParsePlacementError;

/// Compass side of the target the tip attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Side {
    /// All sides, clockwise from north.
    pub const ALL: [Side; 8] = [
        Side::N,
        Side::NE,
        Side::E,
        Side::SE,
        Side::S,
        Side::SW,
        Side::W,
        Side::NW,
    ];

    /// Whether this is a corner (ne, se, sw, nw).
    #[inline]
    pub const fn is_corner(self) -> bool {
        matches!(self, Side::NE | Side::SE | Side::SW | Side::NW)
    }

    /// Lowercase compass name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::N => "n",
            Side::NE => "ne",
            Side::E => "e",
            Side::SE => "se",
            Side::S => "s",
            Side::SW => "sw",
            Side::W => "w",
            Side::NW => "nw",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Side::ALL
            .into_iter()
            .find(|side| side.as_str() == s)
            .ok_or_else(|| ParsePlacementError::new(s))
    }
}

/// A side plus the `alt` corner modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Placement {
    side: Side,
    alt: bool,
}

impl Placement {
    /// Placement on a plain side.
    #[inline]
    pub const fn new(side: Side) -> Self {
        Self { side, alt: false }
    }

    /// Alt variant of a corner. Returns `None` for cardinal sides.
    #[inline]
    pub const fn alt(side: Side) -> Option<Self> {
        if side.is_corner() {
            Some(Self { side, alt: true })
        } else {
            None
        }
    }

    /// The underlying side.
    #[inline]
    pub const fn side(self) -> Side {
        self.side
    }

    /// Whether the alt modifier is set.
    #[inline]
    pub const fn is_alt(self) -> bool {
        self.alt
    }

    /// The ranked candidates tried by smart placement when this placement is
    /// preferred. The last entry is used when every candidate collides.
    pub fn priority_list(self) -> &'static [Placement] {
        match (self.side, self.alt) {
            (Side::N, _) => &LIST_N,
            (Side::E, _) => &LIST_E,
            (Side::S, _) => &LIST_S,
            (Side::W, _) => &LIST_W,
            (Side::NW, false) => &LIST_NW,
            (Side::NE, false) => &LIST_NE,
            (Side::SW, false) => &LIST_SW,
            (Side::SE, false) => &LIST_SE,
            (Side::NW, true) => &LIST_NW_ALT,
            (Side::NE, true) => &LIST_NE_ALT,
            (Side::SW, true) => &LIST_SW_ALT,
            (Side::SE, true) => &LIST_SE_ALT,
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::new(Side::N)
    }
}

impl From<Side> for Placement {
    fn from(side: Side) -> Self {
        Self::new(side)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alt {
            write!(f, "{}-alt", self.side)
        } else {
            write!(f, "{}", self.side)
        }
    }
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_suffix("-alt") {
            Some(base) => {
                let side: Side = base.parse().map_err(|_| ParsePlacementError::new(s))?;
                Placement::alt(side).ok_or_else(|| ParsePlacementError::new(s))
            }
            None => s.parse().map(Placement::new),
        }
    }
}

impl TryFrom<String> for Placement {
    type Error = ParsePlacementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Placement> for String {
    fn from(placement: Placement) -> Self {
        placement.to_string()
    }
}

// ---------------------------------------------------------------------------
// Priority lists
// ---------------------------------------------------------------------------

const N: Placement = Placement::new(Side::N);
const NE: Placement = Placement::new(Side::NE);
const E: Placement = Placement::new(Side::E);
const SE: Placement = Placement::new(Side::SE);
const S: Placement = Placement::new(Side::S);
const SW: Placement = Placement::new(Side::SW);
const W: Placement = Placement::new(Side::W);
const NW: Placement = Placement::new(Side::NW);
const NW_ALT: Placement = Placement {
    side: Side::NW,
    alt: true,
};
const NE_ALT: Placement = Placement {
    side: Side::NE,
    alt: true,
};
const SW_ALT: Placement = Placement {
    side: Side::SW,
    alt: true,
};
const SE_ALT: Placement = Placement {
    side: Side::SE,
    alt: true,
};

const LIST_N: [Placement; 4] = [N, NE, NW, S];
const LIST_E: [Placement; 9] = [E, NE, SE, W, NW, SW, N, S, E];
const LIST_S: [Placement; 4] = [S, SE, SW, N];
const LIST_W: [Placement; 9] = [W, NW, SW, E, NE, SE, N, S, W];
const LIST_NW: [Placement; 7] = [NW, W, SW, N, S, SE, NW];
const LIST_NE: [Placement; 7] = [NE, E, SE, N, S, SW, NE];
const LIST_SW: [Placement; 7] = [SW, W, NW, S, N, NE, SW];
const LIST_SE: [Placement; 7] = [SE, E, NE, S, N, NW, SE];
const LIST_NW_ALT: [Placement; 9] = [NW_ALT, N, NE_ALT, SW_ALT, S, SE_ALT, W, E, NW_ALT];
const LIST_NE_ALT: [Placement; 9] = [NE_ALT, N, NW_ALT, SE_ALT, S, SW_ALT, E, W, NE_ALT];
const LIST_SW_ALT: [Placement; 9] = [SW_ALT, S, SE_ALT, NW_ALT, N, NE_ALT, W, E, SW_ALT];
const LIST_SE_ALT: [Placement; 9] = [SE_ALT, S, SW_ALT, NE_ALT, N, NW_ALT, E, W, SE_ALT];
