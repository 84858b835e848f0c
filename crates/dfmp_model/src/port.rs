//! Macro ports and their directions.

use crate::error::ModelError;
use crate::ids::{NetId, PortId};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a port relative to its macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// Data flows into the macro (`I`).
    Input,
    /// Data flows out of the macro (`O`).
    Output,
    /// Bidirectional or off-chip connection (`B`). Carries no dataflow and
    /// exerts no torque.
    External,
}

impl PortDirection {
    /// Returns the one-letter connectivity code (`I`, `O`, or `B`).
    pub fn code(self) -> char {
        match self {
            PortDirection::Input => 'I',
            PortDirection::Output => 'O',
            PortDirection::External => 'B',
        }
    }

    /// Returns the direction whose pins pull on a port of this direction.
    ///
    /// Inputs are pulled by outputs and vice versa; external ports have no
    /// counterpart.
    pub fn counterpart(self) -> Option<PortDirection> {
        match self {
            PortDirection::Input => Some(PortDirection::Output),
            PortDirection::Output => Some(PortDirection::Input),
            PortDirection::External => None,
        }
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
            PortDirection::External => "external",
        };
        f.write_str(s)
    }
}

impl FromStr for PortDirection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "I" => Ok(PortDirection::Input),
            "O" => Ok(PortDirection::Output),
            "B" => Ok(PortDirection::External),
            other => Err(ModelError::InvalidPortDirection(other.to_string())),
        }
    }
}

/// A connection point on a macro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Index of this port within its macro.
    pub id: PortId,
    /// Offset from the macro's center of mass, in the unrotated frame.
    pub offset: Vector2<f64>,
    /// The net this port belongs to.
    pub net: NetId,
    /// Direction of the port.
    pub direction: PortDirection,
}
