//! Dataflow-driven macro placement with torque-balanced orientation.
//!
//! The placer searches macro positions within the layout bounds using
//! simulated annealing. For every candidate, each macro is rotated so that
//! the torque its connections exert on it vanishes, and the configuration is
//! scored on bounding-box area, overlap, overflow, critical-path dataflow
//! energy and (optionally) wirelength.
//!
//! # Pipeline
//!
//! 1. **Random start** ([`placement::random_positions`]): uniform positions
//!    inside the bounds.
//! 2. **Annealing** ([`placement::Annealer`]): Metropolis search over the
//!    position vector, keeping the best configuration seen.
//! 3. **Orientation** ([`orient::OrientEngine`]): per candidate, a Broyden
//!    root solve on the torque vector, snapped to 0/90/180/270 degrees.
//! 4. **Scoring** ([`placement::CostModel`]): weighted sum of the geometry,
//!    dataflow and wirelength terms.

#![warn(missing_docs)]

pub mod dataflow;
pub mod error;
pub mod geometry;
pub mod orient;
pub mod placement;
pub mod solver;

pub use dataflow::{dataflow_energy, CriticalPath, DataflowGraph};
pub use error::{CyclicDataflowError, PlaceError};
pub use orient::{OrientEngine, OrientReport};
pub use placement::{CostBreakdown, CostModel, PlacementResult, Placer};
pub use solver::{GlobalOptimizer, RootFinder, RootOptions, RootOutcome};

use dfmp_config::{OrientConfig, PlacerConfig};
use dfmp_model::{Bounds, Design};

/// Places `design` within `bounds` and installs the best configuration.
///
/// On success every macro holds its best position and a snapped rotation.
pub fn place(
    design: &mut Design,
    bounds: &Bounds,
    config: &PlacerConfig,
) -> Result<PlacementResult, PlaceError> {
    let result = Placer::new(config.clone()).optimize(design, bounds)?;
    result.apply(design)?;
    Ok(result)
}

/// Balances the torque on every macro at its current position and snaps the
/// rotations, starting from the rotations already in the design.
pub fn orient(design: &mut Design, config: &OrientConfig) -> OrientReport {
    let mut engine = OrientEngine::new(design.macro_count(), config);
    engine.set_rotations(&design.rotations());
    engine.settle(design)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfmp_config::AnnealConfig;
    use dfmp_model::{Macro, Orientation, PortDirection, Vector2};

    fn design() -> Design {
        let mut d = Design::new();
        let a = d.add_macro(Macro::new("a", 4.0, 4.0, false)).unwrap();
        let b = d.add_macro(Macro::new("b", 4.0, 4.0, false)).unwrap();
        let n = d.add_net("n").unwrap();
        d.connect(n, a, PortDirection::Output, Vector2::new(2.0, 0.0))
            .unwrap();
        d.connect(n, b, PortDirection::Input, Vector2::new(-2.0, 0.0))
            .unwrap();
        d
    }

    #[test]
    fn place_installs_result() {
        let mut d = design();
        let config = PlacerConfig {
            anneal: AnnealConfig {
                max_evaluations: 200,
                seed: Some(4),
                ..AnnealConfig::default()
            },
            ..PlacerConfig::default()
        };
        let bounds = Bounds::new(0.0, 40.0, 0.0, 40.0);
        let result = place(&mut d, &bounds, &config).unwrap();
        assert_eq!(d.positions(), result.positions);
        for m in d.macros() {
            assert_eq!(m.rotation(), m.orientation().degrees());
        }
    }

    #[test]
    fn orient_keeps_balanced_design() {
        let mut d = design();
        let b = d.macro_id("b").unwrap();
        d.macro_mut(b).set_position(20.0, 0.0);
        let report = orient(&mut d, &OrientConfig::default());
        assert!(report.converged);
        assert!(d.macros().iter().all(|m| m.orientation() == Orientation::R0));
    }
}
