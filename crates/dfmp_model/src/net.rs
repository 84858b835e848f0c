//! Nets connecting macro ports.

use crate::ids::{MacroId, NetId, PortId};
use crate::port::PortDirection;
use serde::{Deserialize, Serialize};

/// A reference from a net to one port of one macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinRef {
    /// The macro owning the port.
    pub macro_id: MacroId,
    /// The port index within that macro.
    pub port: PortId,
}

/// A named set of electrically connected ports.
///
/// Pins are kept in insertion order per direction category. Membership is
/// fixed once the design is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Net {
    id: NetId,
    name: String,
    inputs: Vec<PinRef>,
    outputs: Vec<PinRef>,
    externals: Vec<PinRef>,
}

impl Net {
    /// Creates an empty net. The ID is assigned by the design.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NetId::from_raw(0),
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            externals: Vec::new(),
        }
    }

    pub(crate) fn set_id(&mut self, id: NetId) {
        self.id = id;
    }

    pub(crate) fn add_pin(&mut self, direction: PortDirection, pin: PinRef) {
        match direction {
            PortDirection::Input => self.inputs.push(pin),
            PortDirection::Output => self.outputs.push(pin),
            PortDirection::External => self.externals.push(pin),
        }
    }

    /// Returns the stable handle of this net.
    pub fn id(&self) -> NetId {
        self.id
    }

    /// Returns the unique net name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the input pins (ports receiving data from this net).
    pub fn inputs(&self) -> &[PinRef] {
        &self.inputs
    }

    /// Returns the output pins (ports driving this net).
    pub fn outputs(&self) -> &[PinRef] {
        &self.outputs
    }

    /// Returns the external/bidirectional pins.
    pub fn externals(&self) -> &[PinRef] {
        &self.externals
    }

    /// Returns the pins of one direction category.
    pub fn pins(&self, direction: PortDirection) -> &[PinRef] {
        match direction {
            PortDirection::Input => &self.inputs,
            PortDirection::Output => &self.outputs,
            PortDirection::External => &self.externals,
        }
    }

    /// Iterates over every pin with its direction: inputs, then outputs, then
    /// externals.
    pub fn all_pins(&self) -> impl Iterator<Item = (PortDirection, PinRef)> + '_ {
        self.inputs
            .iter()
            .map(|p| (PortDirection::Input, *p))
            .chain(self.outputs.iter().map(|p| (PortDirection::Output, *p)))
            .chain(self.externals.iter().map(|p| (PortDirection::External, *p)))
    }

    /// Returns the total number of pins across all categories.
    pub fn degree(&self) -> usize {
        self.inputs.len() + self.outputs.len() + self.externals.len()
    }
}
