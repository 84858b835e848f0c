//! Placement cost functions.
//!
//! The scalar cost is a weighted sum of five terms: bounding-box area,
//! wirelength, dataflow energy, pairwise overlap and overflow past the
//! layout bounds. Overlap and overflow carry large default weights so that
//! illegal placements are strongly penalized.

use crate::dataflow::dataflow_energy;
use crate::error::CyclicDataflowError;
use crate::geometry::{total_area, total_overflow, total_overlap};
use dfmp_config::{CostConfig, WirelengthModel};
use dfmp_model::{Bounds, Design, Net};

/// Every term of one cost evaluation, unweighted, plus the weighted total.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostBreakdown {
    /// Bounding-box area of all macros.
    pub area: f64,
    /// Wirelength estimate. Zero when wirelength is disabled.
    pub hpwl: f64,
    /// Critical-path dataflow energy.
    pub energy: f64,
    /// Sum of pairwise overlap areas.
    pub overlap: f64,
    /// Footprint area outside the layout bounds.
    pub overflow: f64,
    /// Weighted sum of the terms above.
    pub total: f64,
}

/// Scores placements of one design against fixed layout bounds.
#[derive(Debug, Clone)]
pub struct CostModel {
    weights: CostConfig,
    bounds: Bounds,
}

impl CostModel {
    /// Creates a cost model with the given weights.
    pub fn new(weights: CostConfig, bounds: Bounds) -> Self {
        Self { weights, bounds }
    }

    /// Returns the layout bounds used for overflow.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Scores the design at its current positions and rotations.
    ///
    /// Fails if the dataflow graph is cyclic, since its energy is undefined.
    pub fn evaluate(&self, design: &Design) -> Result<CostBreakdown, CyclicDataflowError> {
        let area = total_area(design);
        let hpwl = total_hpwl(design, self.weights.wirelength);
        let energy = dataflow_energy(design)?;
        let overlap = total_overlap(design);
        let overflow = total_overflow(&self.bounds, design);

        let w = &self.weights;
        let total = w.area * area
            + w.hpwl * hpwl
            + w.energy * energy
            + w.overlap * overlap
            + w.overflow * overflow;

        Ok(CostBreakdown {
            area,
            hpwl,
            energy,
            overlap,
            overflow,
            total,
        })
    }
}

/// Computes the total wirelength across all nets under `model`.
///
/// [`WirelengthModel::Disabled`] always yields 0.
pub fn total_hpwl(design: &Design, model: WirelengthModel) -> f64 {
    match model {
        WirelengthModel::Disabled => 0.0,
        WirelengthModel::HalfPerimeter => design.nets().iter().map(|n| net_hpwl(design, n)).sum(),
    }
}

/// Computes the half-perimeter of the bounding box of a net's pins.
///
/// Nets with fewer than two pins have zero wirelength.
pub fn net_hpwl(design: &Design, net: &Net) -> f64 {
    if net.degree() < 2 {
        return 0.0;
    }

    let mut min_x = f64::MAX;
    let mut max_x = f64::MIN;
    let mut min_y = f64::MAX;
    let mut max_y = f64::MIN;

    for (_, pin) in net.all_pins() {
        let p = design.pin_location(pin);
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    (max_x - min_x) + (max_y - min_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfmp_model::{Macro, PortDirection, Vector2};

    fn chain() -> Design {
        let mut d = Design::new();
        let a = d.add_macro(Macro::new("a", 10.0, 10.0, false)).unwrap();
        let b = d.add_macro(Macro::new("b", 10.0, 10.0, false)).unwrap();
        d.macro_mut(a).set_position(0.0, 10.0);
        d.macro_mut(b).set_position(20.0, 10.0);
        let n = d.add_net("n").unwrap();
        d.connect(n, a, PortDirection::Output, Vector2::zeros())
            .unwrap();
        d.connect(n, b, PortDirection::Input, Vector2::zeros())
            .unwrap();
        d
    }

    fn bounds() -> Bounds {
        Bounds::new(0.0, 100.0, 0.0, 100.0)
    }

    #[test]
    fn breakdown_terms() {
        let d = chain();
        let cost = CostModel::new(CostConfig::default(), bounds())
            .evaluate(&d)
            .unwrap();
        assert_eq!(cost.area, 30.0 * 10.0);
        assert_eq!(cost.hpwl, 0.0);
        assert!((cost.energy - 400.0).abs() < 1e-9);
        assert_eq!(cost.overlap, 200.0);
        // each macro leaves 10000 - 100 of the layout uncovered
        assert_eq!(cost.overflow, 2.0 * 9_900.0);
        let expected = 300.0 + 400.0 + 100.0 * 200.0 + 100.0 * 19_800.0;
        assert!((cost.total - expected).abs() < 1e-6);
    }

    #[test]
    fn weights_scale_terms() {
        let d = chain();
        let weights = CostConfig {
            area: 0.0,
            energy: 2.0,
            overlap: 0.0,
            overflow: 0.0,
            ..CostConfig::default()
        };
        let cost = CostModel::new(weights, bounds()).evaluate(&d).unwrap();
        assert!((cost.total - 800.0).abs() < 1e-6);
    }

    #[test]
    fn overflow_is_penalized() {
        let mut d = chain();
        let b = d.macro_id("b").unwrap();
        d.macro_mut(b).set_position(200.0, 10.0);
        let cost = CostModel::new(CostConfig::default(), bounds())
            .evaluate(&d)
            .unwrap();
        // a stays inside, b is entirely outside
        assert_eq!(cost.overflow, 9_900.0 + 10_000.0);
    }

    #[test]
    fn half_perimeter_wirelength() {
        let mut d = chain();
        let b = d.macro_id("b").unwrap();
        d.macro_mut(b).set_position(20.0, 15.0);
        // pins at (-5, 5) and (15, 10)
        assert!((total_hpwl(&d, WirelengthModel::HalfPerimeter) - 25.0).abs() < 1e-9);
        assert_eq!(total_hpwl(&d, WirelengthModel::Disabled), 0.0);
    }

    #[test]
    fn single_pin_net_has_no_wirelength() {
        let mut d = Design::new();
        let a = d.add_macro(Macro::new("a", 1.0, 1.0, false)).unwrap();
        let n = d.add_net("n").unwrap();
        d.connect(n, a, PortDirection::Input, Vector2::zeros())
            .unwrap();
        assert_eq!(net_hpwl(&d, d.net(n)), 0.0);
    }

    #[test]
    fn cyclic_design_fails() {
        let mut d = chain();
        let a = d.macro_id("a").unwrap();
        let b = d.macro_id("b").unwrap();
        let back = d.add_net("back").unwrap();
        d.connect(back, b, PortDirection::Output, Vector2::zeros())
            .unwrap();
        d.connect(back, a, PortDirection::Input, Vector2::zeros())
            .unwrap();
        assert!(CostModel::new(CostConfig::default(), bounds())
            .evaluate(&d)
            .is_err());
    }
}
