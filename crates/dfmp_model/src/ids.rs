//! Opaque ID newtypes for placement entities.
//!
//! [`MacroId`] and [`NetId`] are stable handles into the [`Design`](crate::Design)
//! arena, assigned in load order. [`PortId`] indexes the port list of a single
//! macro and is unique across all of that macro's ports regardless of
//! direction.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            /// Returns the index as a `usize`, for slice indexing.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Stable handle of a macro in the design arena.
    MacroId
);

define_id!(
    /// Stable handle of a net in the design arena.
    NetId
);

define_id!(
    /// Index of a port within its owning macro.
    PortId
);
