//! The four manufacturable macro orientations.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A counter-clockwise quarter-turn rotation of a macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Unrotated (Bookshelf `N`).
    #[default]
    R0,
    /// Rotated by 90 degrees (Bookshelf `W`).
    R90,
    /// Rotated by 180 degrees (Bookshelf `S`).
    R180,
    /// Rotated by 270 degrees (Bookshelf `E`).
    R270,
}

impl Orientation {
    /// All orientations in ascending angle order.
    pub const ALL: [Orientation; 4] = [
        Orientation::R0,
        Orientation::R90,
        Orientation::R180,
        Orientation::R270,
    ];

    /// Maps an arbitrary angle in degrees to the nearest orientation.
    ///
    /// The angle is first reduced into `[0, 360)`. Boundaries are half-open:
    /// `[315, 360) ∪ [0, 45)` is 0, `[45, 135)` is 90, `[135, 225)` is 180 and
    /// `[225, 315)` is 270.
    pub fn snap(degrees: f64) -> Orientation {
        let angle = degrees.rem_euclid(360.0);
        if angle < 45.0 {
            Orientation::R0
        } else if angle < 135.0 {
            Orientation::R90
        } else if angle < 225.0 {
            Orientation::R180
        } else if angle < 315.0 {
            Orientation::R270
        } else {
            Orientation::R0
        }
    }

    /// Returns the rotation angle in degrees.
    pub fn degrees(self) -> f64 {
        match self {
            Orientation::R0 => 0.0,
            Orientation::R90 => 90.0,
            Orientation::R180 => 180.0,
            Orientation::R270 => 270.0,
        }
    }

    /// Returns `true` for 90 and 270 degrees, where width and height swap.
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, Orientation::R90 | Orientation::R270)
    }

    /// Returns the Bookshelf compass code.
    pub fn compass(self) -> &'static str {
        match self {
            Orientation::R0 => "N",
            Orientation::R90 => "W",
            Orientation::R180 => "S",
            Orientation::R270 => "E",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees() as u32)
    }
}

impl FromStr for Orientation {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" | "N" => Ok(Orientation::R0),
            "90" | "W" => Ok(Orientation::R90),
            "180" | "S" => Ok(Orientation::R180),
            "270" | "E" => Ok(Orientation::R270),
            other => Err(ModelError::InvalidOrientation(other.to_string())),
        }
    }
}
