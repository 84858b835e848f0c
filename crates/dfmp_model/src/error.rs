//! Structural errors raised while building a design.

use crate::port::PortDirection;

/// Errors that can occur when constructing macros, nets, and their ports.
///
/// These are load-time failures: a [`Design`](crate::Design) that was built
/// successfully never violates the invariants they guard.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// A macro with the same name already exists in the design.
    #[error("duplicate macro '{0}'")]
    DuplicateMacro(String),

    /// A net with the same name already exists in the design.
    #[error("duplicate net '{0}'")]
    DuplicateNet(String),

    /// The macro already has a port of this direction on this net.
    #[error("macro '{macro_name}' already has an {direction} port on net '{net}'")]
    DuplicatePort {
        /// Name of the macro owning the ports.
        macro_name: String,
        /// Name of the net both ports belong to.
        net: String,
        /// Direction shared by both ports.
        direction: PortDirection,
    },

    /// A macro name was referenced that does not exist in the design.
    #[error("unknown macro '{0}'")]
    UnknownMacro(String),

    /// A net name was referenced that does not exist in the design.
    #[error("unknown net '{0}'")]
    UnknownNet(String),

    /// A port direction code other than `I`, `O`, or `B`.
    #[error("invalid port direction '{0}' (expected I, O or B)")]
    InvalidPortDirection(String),

    /// Layout bounds that are non-finite or inverted.
    #[error("invalid layout bounds: {0}")]
    InvalidBounds(String),

    /// An orientation that is not one of the four manufacturable ones.
    #[error("invalid orientation '{0}' (expected 0, 90, 180, 270 or N, W, S, E)")]
    InvalidOrientation(String),
}
