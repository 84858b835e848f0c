//! Rectangular placement blocks.

use crate::error::ModelError;
use crate::ids::{MacroId, NetId, PortId};
use crate::orientation::Orientation;
use crate::port::{Port, PortDirection};
use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

/// A fixed-shape rectangular block with ports.
///
/// The position is the top-left corner of the bounding box: the macro spans
/// `x .. x + width` horizontally and `y - height .. y` vertically. Ports are
/// stored in a single list indexed by [`PortId`]; dimensions and ports are
/// immutable once the design is loaded, while position and rotation are
/// updated by the placer and the orientation solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macro {
    id: MacroId,
    name: String,
    width: f64,
    height: f64,
    rotation: f64,
    fixed: bool,
    position: Vector2<f64>,
    ports: Vec<Port>,
}

impl Macro {
    /// Creates an unplaced, unrotated macro without ports.
    ///
    /// The ID is a placeholder until the macro is added to a
    /// [`Design`](crate::Design).
    pub fn new(name: impl Into<String>, width: f64, height: f64, fixed: bool) -> Self {
        Self {
            id: MacroId::from_raw(0),
            name: name.into(),
            width,
            height,
            rotation: 0.0,
            fixed,
            position: Vector2::zeros(),
            ports: Vec::new(),
        }
    }

    pub(crate) fn set_id(&mut self, id: MacroId) {
        self.id = id;
    }

    /// Returns the stable handle of this macro.
    pub fn id(&self) -> MacroId {
        self.id
    }

    /// Returns the unique macro name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unrotated `(width, height)`.
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Returns the rotation-aware `(width, height)`; swapped for 90 and 270
    /// degrees.
    pub fn dimensions(&self) -> (f64, f64) {
        if self.orientation().is_quarter_turn() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Returns the unrotated footprint area.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns whether the macro is a fixed terminal.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Marks the macro as a fixed terminal, e.g. from a `/FIXED` placement
    /// entry.
    pub fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
    }

    /// Returns the top-left corner position.
    pub fn position(&self) -> Vector2<f64> {
        self.position
    }

    /// Moves the macro so its top-left corner is at `(x, y)`.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Vector2::new(x, y);
    }

    /// Returns the current rotation angle in degrees.
    ///
    /// During an orientation solve this may be any trial angle; after
    /// snapping it is one of 0, 90, 180, 270.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Sets a continuous trial rotation in degrees.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    /// Returns the nearest manufacturable orientation of the current rotation.
    pub fn orientation(&self) -> Orientation {
        Orientation::snap(self.rotation)
    }

    /// Sets one of the four manufacturable orientations.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.rotation = orientation.degrees();
    }

    /// Returns the center-of-mass offset, i.e. the unrotated half-dimensions.
    pub fn center_of_mass(&self) -> Vector2<f64> {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Returns all ports in index order.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Returns the port with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not returned by [`Macro::add_port`] on this macro.
    pub fn port(&self, id: PortId) -> &Port {
        &self.ports[id.index()]
    }

    /// Finds this macro's port of the given direction on a net.
    pub fn find_port(&self, net: NetId, direction: PortDirection) -> Option<&Port> {
        self.ports
            .iter()
            .find(|p| p.net == net && p.direction == direction)
    }

    /// Attaches a new port, enforcing one port per (net, direction).
    ///
    /// `net_name` is only used to build the error message.
    pub(crate) fn add_port(
        &mut self,
        net: NetId,
        net_name: &str,
        direction: PortDirection,
        offset: Vector2<f64>,
    ) -> Result<PortId, ModelError> {
        if self.find_port(net, direction).is_some() {
            return Err(ModelError::DuplicatePort {
                macro_name: self.name.clone(),
                net: net_name.to_string(),
                direction,
            });
        }
        let id = PortId::from_raw(self.ports.len() as u32);
        self.ports.push(Port {
            id,
            offset,
            net,
            direction,
        });
        Ok(id)
    }

    /// Returns the port's offset rotated by the current rotation.
    pub fn port_radius(&self, id: PortId) -> Vector2<f64> {
        rotate(self.port(id).offset, self.rotation)
    }

    /// Returns the port's world-space location: rotated offset plus position
    /// minus center of mass.
    pub fn port_location(&self, id: PortId) -> Vector2<f64> {
        self.port_radius(id) + self.position - self.center_of_mass()
    }
}

/// Rotates a vector counter-clockwise by `degrees`.
pub fn rotate(v: Vector2<f64>, degrees: f64) -> Vector2<f64> {
    Rotation2::new(degrees.to_radians()) * v
}
