//! Entity model for dataflow-driven macro placement.
//!
//! This crate defines the macros, ports, and nets of a placement problem and
//! the [`Design`] arena that owns them. It is pure data: loaders populate it,
//! the placer mutates macro positions and rotations, and writers serialize the
//! final snapshot.

#![warn(missing_docs)]

pub mod bounds;
pub mod design;
pub mod error;
pub mod hard_macro;
pub mod ids;
pub mod net;
pub mod orientation;
pub mod port;

pub use bounds::Bounds;
pub use design::Design;
pub use error::ModelError;
pub use hard_macro::{rotate, Macro};
pub use ids::{MacroId, NetId, PortId};
pub use net::{Net, PinRef};
pub use orientation::Orientation;
pub use port::{Port, PortDirection};

pub use nalgebra::Vector2;
