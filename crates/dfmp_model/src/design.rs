//! The design arena holding every macro and net.
//!
//! [`Design`] is the central data structure that flows from the loader through
//! the placer and back out to the writer. Macros and nets are stored in
//! vectors indexed by [`MacroId`] / [`NetId`], with auxiliary name indices for
//! lookups during loading.

use crate::error::ModelError;
use crate::hard_macro::Macro;
use crate::ids::{MacroId, NetId, PortId};
use crate::net::{Net, PinRef};
use crate::port::PortDirection;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All macros and nets of one placement problem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Design {
    macros: Vec<Macro>,
    nets: Vec<Net>,
    /// Auxiliary index: macro name to ID (rebuilt on deserialization).
    #[serde(skip)]
    macro_by_name: HashMap<String, MacroId>,
    /// Auxiliary index: net name to ID (rebuilt on deserialization).
    #[serde(skip)]
    net_by_name: HashMap<String, NetId>,
}

impl Design {
    /// Creates an empty design.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a macro and returns its ID.
    pub fn add_macro(&mut self, mut m: Macro) -> Result<MacroId, ModelError> {
        if self.macro_by_name.contains_key(m.name()) {
            return Err(ModelError::DuplicateMacro(m.name().to_string()));
        }
        let id = MacroId::from_raw(self.macros.len() as u32);
        m.set_id(id);
        self.macro_by_name.insert(m.name().to_string(), id);
        self.macros.push(m);
        Ok(id)
    }

    /// Adds an empty net and returns its ID.
    pub fn add_net(&mut self, name: impl Into<String>) -> Result<NetId, ModelError> {
        let mut net = Net::new(name);
        if self.net_by_name.contains_key(net.name()) {
            return Err(ModelError::DuplicateNet(net.name().to_string()));
        }
        let id = NetId::from_raw(self.nets.len() as u32);
        net.set_id(id);
        self.net_by_name.insert(net.name().to_string(), id);
        self.nets.push(net);
        Ok(id)
    }

    /// Connects a macro to a net through a new port.
    ///
    /// The port is attached to the macro and the pin appended to the net's
    /// list for `direction`. Fails if the macro already has a port of the same
    /// direction on this net.
    ///
    /// # Panics
    ///
    /// Panics if `net` or `macro_id` was not issued by this design.
    pub fn connect(
        &mut self,
        net: NetId,
        macro_id: MacroId,
        direction: PortDirection,
        offset: Vector2<f64>,
    ) -> Result<PortId, ModelError> {
        let net_name = self.nets[net.index()].name().to_string();
        let port = self.macros[macro_id.index()].add_port(net, &net_name, direction, offset)?;
        self.nets[net.index()].add_pin(direction, PinRef { macro_id, port });
        Ok(port)
    }

    /// Returns the macro with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this design.
    pub fn macro_ref(&self, id: MacroId) -> &Macro {
        &self.macros[id.index()]
    }

    /// Returns a mutable reference to the macro with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this design.
    pub fn macro_mut(&mut self, id: MacroId) -> &mut Macro {
        &mut self.macros[id.index()]
    }

    /// Returns the net with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this design.
    pub fn net(&self, id: NetId) -> &Net {
        &self.nets[id.index()]
    }

    /// Looks up a macro ID by name.
    pub fn macro_id(&self, name: &str) -> Option<MacroId> {
        self.macro_by_name.get(name).copied()
    }

    /// Looks up a macro ID by name, failing with [`ModelError::UnknownMacro`].
    pub fn require_macro(&self, name: &str) -> Result<MacroId, ModelError> {
        self.macro_id(name)
            .ok_or_else(|| ModelError::UnknownMacro(name.to_string()))
    }

    /// Looks up a net ID by name.
    pub fn net_id(&self, name: &str) -> Option<NetId> {
        self.net_by_name.get(name).copied()
    }

    /// Returns all macros in arena order.
    pub fn macros(&self) -> &[Macro] {
        &self.macros
    }

    /// Iterates over every macro ID in arena order.
    pub fn macro_ids(&self) -> impl Iterator<Item = MacroId> + '_ {
        self.macros.iter().map(Macro::id)
    }

    /// Returns all macros mutably in arena order.
    pub fn macros_mut(&mut self) -> &mut [Macro] {
        &mut self.macros
    }

    /// Returns all nets in arena order.
    pub fn nets(&self) -> &[Net] {
        &self.nets
    }

    /// Returns the number of macros.
    pub fn macro_count(&self) -> usize {
        self.macros.len()
    }

    /// Returns the number of nets.
    pub fn net_count(&self) -> usize {
        self.nets.len()
    }

    /// Returns the total number of pins over all nets.
    pub fn pin_count(&self) -> usize {
        self.nets.iter().map(Net::degree).sum()
    }

    /// Returns the number of fixed terminal macros.
    pub fn fixed_count(&self) -> usize {
        self.macros.iter().filter(|m| m.is_fixed()).count()
    }

    /// Returns the world-space location of one port of a macro.
    ///
    /// # Panics
    ///
    /// Panics if `macro_id` or `port` does not belong to this design.
    pub fn port_location(&self, macro_id: MacroId, port: PortId) -> Vector2<f64> {
        self.macro_ref(macro_id).port_location(port)
    }

    /// Returns the world-space location of a pin.
    pub fn pin_location(&self, pin: PinRef) -> Vector2<f64> {
        self.port_location(pin.macro_id, pin.port)
    }

    /// Flattens macro positions into `[x0, y0, x1, y1, ...]` in arena order.
    pub fn positions(&self) -> Vec<f64> {
        self.macros
            .iter()
            .flat_map(|m| {
                let p = m.position();
                [p.x, p.y]
            })
            .collect()
    }

    /// Writes a flattened position vector back into the macros.
    ///
    /// The vector must hold exactly two coordinates per macro.
    pub fn apply_positions(&mut self, positions: &[f64]) {
        debug_assert_eq!(positions.len(), self.macros.len() * 2);
        for (m, xy) in self.macros.iter_mut().zip(positions.chunks_exact(2)) {
            m.set_position(xy[0], xy[1]);
        }
    }

    /// Returns every macro's rotation angle in arena order.
    pub fn rotations(&self) -> Vec<f64> {
        self.macros.iter().map(Macro::rotation).collect()
    }

    /// Writes rotation angles back into the macros, in arena order.
    pub fn apply_rotations(&mut self, rotations: &[f64]) {
        debug_assert_eq!(rotations.len(), self.macros.len());
        for (m, &r) in self.macros.iter_mut().zip(rotations) {
            m.set_rotation(r);
        }
    }

    /// Rebuilds the name indices after deserialization.
    pub fn rebuild_indices(&mut self) {
        self.macro_by_name.clear();
        for m in &self.macros {
            self.macro_by_name.insert(m.name().to_string(), m.id());
        }
        self.net_by_name.clear();
        for n in &self.nets {
            self.net_by_name.insert(n.name().to_string(), n.id());
        }
    }
}
