//! Net torque on each macro.
//!
//! A port is pulled toward every counterpart pin on its net: inputs toward
//! outputs and outputs toward inputs. The pull acts at the port's rotated
//! offset from the macro's center of mass, so its torque is the z component
//! of `radius × (pin - port)`. Pins on the same macro and external ports are
//! ignored.

use dfmp_model::{Design, Vector2};
use nalgebra::DVector;

/// Returns the z component of the 2D cross product `a × b`.
pub fn cross_z(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Computes the net torque on every macro at the current rotations, in
/// arena order.
pub fn torque_vector(design: &Design) -> DVector<f64> {
    DVector::from_iterator(
        design.macro_count(),
        design.macros().iter().map(|m| {
            let mut torque = 0.0;
            for port in m.ports() {
                let Some(pulled_by) = port.direction.counterpart() else {
                    continue;
                };
                let radius = m.port_radius(port.id);
                let location = m.port_location(port.id);
                for &pin in design.net(port.net).pins(pulled_by) {
                    if pin.macro_id == m.id() {
                        continue;
                    }
                    torque += cross_z(radius, design.pin_location(pin) - location);
                }
            }
            torque
        }),
    )
}
