//! Placement engine.
//!
//! Searches macro positions within the layout bounds. Every candidate
//! position vector is written into the design, the orientation solver
//! settles each macro's rotation, and the resulting configuration is scored
//! by [`CostModel`]. The default search is a random initial placement
//! followed by simulated annealing.

mod anneal;
mod cost;
mod random;

pub use anneal::Annealer;
pub use cost::{net_hpwl, total_hpwl, CostBreakdown, CostModel};
pub use random::random_positions;

use crate::error::PlaceError;
use crate::orient::OrientEngine;
use crate::solver::{GlobalOptimizer, SearchSpace};
use dfmp_config::{FixedMacroPolicy, PlacerConfig};
use dfmp_model::{Bounds, Design};

/// Outcome of a placement run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementResult {
    /// Best position vector, `[x0, y0, x1, y1, ...]` in arena order.
    pub positions: Vec<f64>,
    /// Snapped rotations the best positions were scored with.
    pub rotations: Vec<f64>,
    /// Cost terms of the best configuration.
    pub cost: CostBreakdown,
    /// Cost evaluations performed.
    pub evaluations: usize,
    /// Moves accepted by the search.
    pub accepted: usize,
}

impl PlacementResult {
    /// Writes the best positions and their rotations into `design`.
    pub fn apply(&self, design: &mut Design) -> Result<(), PlaceError> {
        let n = design.macro_count();
        check_len(n * 2, self.positions.len())?;
        check_len(n, self.rotations.len())?;
        design.apply_positions(&self.positions);
        design.apply_rotations(&self.rotations);
        Ok(())
    }
}

/// Position search driver.
#[derive(Debug, Clone, Default)]
pub struct Placer {
    config: PlacerConfig,
}

impl Placer {
    /// Creates a placer with the given configuration.
    pub fn new(config: PlacerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PlacerConfig {
        &self.config
    }

    /// Places the design by simulated annealing from a random start.
    ///
    /// The design is left holding the last trial configuration; call
    /// [`PlacementResult::apply`] to install the best one.
    pub fn optimize(
        &self,
        design: &mut Design,
        bounds: &Bounds,
    ) -> Result<PlacementResult, PlaceError> {
        bounds.validate()?;
        let mut annealer = Annealer::new(&self.config.anneal);
        let initial = random_positions(
            design,
            bounds,
            self.config.placement.fixed_macros,
            annealer.rng_mut(),
        );
        self.optimize_with(design, bounds, initial, &mut annealer)
    }

    /// Places the design with a caller-supplied optimizer and starting point.
    pub fn optimize_with(
        &self,
        design: &mut Design,
        bounds: &Bounds,
        initial: Vec<f64>,
        optimizer: &mut dyn GlobalOptimizer,
    ) -> Result<PlacementResult, PlaceError> {
        bounds.validate()?;
        let n = design.macro_count();
        check_len(n * 2, initial.len())?;

        let space = search_space(design, bounds, initial, self.config.placement.fixed_macros);
        let model = CostModel::new(self.config.cost.clone(), *bounds);
        let mut engine = OrientEngine::new(n, &self.config.orient);
        engine.set_rotations(&design.rotations());

        log::info!(
            "placing {} macros ({} fixed, {:?}) in {bounds}",
            n,
            design.fixed_count(),
            self.config.placement.fixed_macros
        );

        let mut best: Option<(CostBreakdown, Vec<f64>)> = None;
        let minimum = {
            let mut objective = |x: &[f64]| -> Result<f64, PlaceError> {
                let cost = evaluate_candidate(design, x, &mut engine, &model)?;
                if best.as_ref().map_or(true, |(b, _)| cost.total < b.total) {
                    best = Some((cost, engine.rotations().to_vec()));
                }
                Ok(cost.total)
            };
            optimizer.minimize(&mut objective, &space)?
        };

        let (cost, rotations) =
            best.unwrap_or_else(|| (CostBreakdown::default(), design.rotations()));
        log::info!(
            "placement done: cost {:.6e} after {} evaluations ({} accepted)",
            cost.total,
            minimum.evaluations,
            minimum.accepted
        );

        Ok(PlacementResult {
            positions: minimum.x,
            rotations,
            cost,
            evaluations: minimum.evaluations,
            accepted: minimum.accepted,
        })
    }
}

/// Scores one candidate: writes `positions`, settles orientations, evaluates
/// the cost.
pub fn evaluate_candidate(
    design: &mut Design,
    positions: &[f64],
    engine: &mut OrientEngine,
    model: &CostModel,
) -> Result<CostBreakdown, PlaceError> {
    check_len(design.macro_count() * 2, positions.len())?;
    design.apply_positions(positions);
    let report = engine.settle(design);
    let cost = model.evaluate(design)?;
    log::debug!(
        "cost {:.6e} (area {:.3e}, hpwl {:.3e}, energy {:.3e}, overlap {:.3e}, \
         overflow {:.3e}); orientation {} in {} iterations",
        cost.total,
        cost.area,
        cost.hpwl,
        cost.energy,
        cost.overlap,
        cost.overflow,
        if report.converged { "converged" } else { "unconverged" },
        report.iterations
    );
    Ok(cost)
}

/// Builds the box-constrained space: two coordinates per macro, frozen for
/// fixed macros under [`FixedMacroPolicy::Pinned`].
fn search_space(
    design: &Design,
    bounds: &Bounds,
    initial: Vec<f64>,
    policy: FixedMacroPolicy,
) -> SearchSpace {
    let mut ranges = Vec::with_capacity(initial.len());
    let mut frozen = Vec::with_capacity(initial.len());
    for (m, xy) in design.macros().iter().zip(initial.chunks_exact(2)) {
        if m.is_fixed() && policy == FixedMacroPolicy::Pinned {
            ranges.extend([(xy[0], xy[0]), (xy[1], xy[1])]);
            frozen.extend([true, true]);
        } else {
            ranges.extend([bounds.x_range(), bounds.y_range()]);
            frozen.extend([false, false]);
        }
    }
    SearchSpace {
        initial,
        bounds: ranges,
        frozen,
    }
}

fn check_len(expected: usize, actual: usize) -> Result<(), PlaceError> {
    if expected == actual {
        Ok(())
    } else {
        Err(PlaceError::DimensionMismatch { expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfmp_config::{AnnealConfig, CostConfig};
    use dfmp_model::{Macro, ModelError, PortDirection, Vector2};

    fn make_test_design() -> Design {
        let mut d = Design::new();
        let a = d.add_macro(Macro::new("a", 10.0, 10.0, false)).unwrap();
        let b = d.add_macro(Macro::new("b", 10.0, 5.0, false)).unwrap();
        let c = d.add_macro(Macro::new("c", 5.0, 5.0, false)).unwrap();
        let pad = d.add_macro(Macro::new("pad", 2.0, 2.0, true)).unwrap();
        d.macro_mut(pad).set_position(0.0, 2.0);

        let n0 = d.add_net("n0").unwrap();
        d.connect(n0, pad, PortDirection::Output, Vector2::new(1.0, 0.0))
            .unwrap();
        d.connect(n0, a, PortDirection::Input, Vector2::new(-5.0, 0.0))
            .unwrap();
        let n1 = d.add_net("n1").unwrap();
        d.connect(n1, a, PortDirection::Output, Vector2::new(5.0, 0.0))
            .unwrap();
        d.connect(n1, b, PortDirection::Input, Vector2::new(-5.0, 1.0))
            .unwrap();
        d.connect(n1, c, PortDirection::Input, Vector2::new(0.0, 2.5))
            .unwrap();
        d
    }

    fn bounds() -> Bounds {
        Bounds::new(0.0, 60.0, 0.0, 60.0)
    }

    fn config(seed: u64) -> PlacerConfig {
        PlacerConfig {
            anneal: AnnealConfig {
                max_evaluations: 300,
                seed: Some(seed),
                ..AnnealConfig::default()
            },
            ..PlacerConfig::default()
        }
    }

    fn in_bounds(b: &Bounds, xy: &[f64]) -> bool {
        (b.min_x..=b.max_x).contains(&xy[0]) && (b.min_y..=b.max_y).contains(&xy[1])
    }

    #[test]
    fn never_worse_than_start() {
        let mut d = make_test_design();
        let initial = vec![30.0, 30.0, 30.0, 30.0, 30.0, 30.0, 30.0, 30.0];
        let cfg = config(11);

        let mut scratch = d.clone();
        let mut engine = OrientEngine::new(scratch.macro_count(), &cfg.orient);
        engine.set_rotations(&scratch.rotations());
        let model = CostModel::new(cfg.cost.clone(), bounds());
        let start = evaluate_candidate(&mut scratch, &initial, &mut engine, &model).unwrap();

        let placer = Placer::new(cfg.clone());
        let mut annealer = Annealer::new(&cfg.anneal);
        let result = placer
            .optimize_with(&mut d, &bounds(), initial, &mut annealer)
            .unwrap();
        assert!(result.cost.total <= start.total);
        assert!(result.evaluations <= 300);
    }

    #[test]
    fn result_respects_bounds() {
        let mut d = make_test_design();
        let result = Placer::new(config(3)).optimize(&mut d, &bounds()).unwrap();
        assert_eq!(result.positions.len(), 8);
        assert!(result.positions.chunks_exact(2).all(|xy| in_bounds(&bounds(), xy)));
    }

    #[test]
    fn apply_installs_best_configuration() {
        let mut d = make_test_design();
        let result = Placer::new(config(5)).optimize(&mut d, &bounds()).unwrap();
        result.apply(&mut d).unwrap();
        assert_eq!(d.positions(), result.positions);
        assert_eq!(d.rotations(), result.rotations);

        let model = CostModel::new(CostConfig::default(), bounds());
        let rescored = model.evaluate(&d).unwrap();
        assert!((rescored.total - result.cost.total).abs() < 1e-6 * result.cost.total.max(1.0));
    }

    #[test]
    fn pinned_fixed_macros_stay_put() {
        let mut d = make_test_design();
        let mut cfg = config(8);
        cfg.placement.fixed_macros = FixedMacroPolicy::Pinned;
        let result = Placer::new(cfg).optimize(&mut d, &bounds()).unwrap();
        assert_eq!(&result.positions[6..8], &[0.0, 2.0]);
    }

    #[test]
    fn movable_fixed_macros_are_searched() {
        let d = make_test_design();
        let space = search_space(&d, &bounds(), d.positions(), FixedMacroPolicy::Movable);
        assert!(space.frozen.iter().all(|f| !f));
        let space = search_space(&d, &bounds(), d.positions(), FixedMacroPolicy::Pinned);
        assert_eq!(space.free_coordinates(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(space.bounds[6], (0.0, 0.0));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut d1 = make_test_design();
        let mut d2 = make_test_design();
        let r1 = Placer::new(config(21)).optimize(&mut d1, &bounds()).unwrap();
        let r2 = Placer::new(config(21)).optimize(&mut d2, &bounds()).unwrap();
        assert_eq!(r1, r2);
    }

    #[test]
    fn cyclic_design_aborts() {
        let mut d = make_test_design();
        let a = d.macro_id("a").unwrap();
        let b = d.macro_id("b").unwrap();
        let back = d.add_net("back").unwrap();
        d.connect(back, b, PortDirection::Output, Vector2::zeros())
            .unwrap();
        d.connect(back, a, PortDirection::Input, Vector2::zeros())
            .unwrap();
        let err = Placer::new(config(1)).optimize(&mut d, &bounds()).unwrap_err();
        assert!(matches!(err, PlaceError::Cyclic(_)));
    }

    #[test]
    fn invalid_bounds_rejected() {
        let mut d = make_test_design();
        let err = Placer::new(config(1))
            .optimize(&mut d, &Bounds::new(10.0, 0.0, 0.0, 10.0))
            .unwrap_err();
        assert!(matches!(err, PlaceError::Model(ModelError::InvalidBounds(_))));
    }

    #[test]
    fn wrong_initial_length_rejected() {
        let mut d = make_test_design();
        let cfg = config(1);
        let mut annealer = Annealer::new(&cfg.anneal);
        let err = Placer::new(cfg)
            .optimize_with(&mut d, &bounds(), vec![0.0; 3], &mut annealer)
            .unwrap_err();
        assert_eq!(
            err,
            PlaceError::DimensionMismatch {
                expected: 8,
                actual: 3
            }
        );
    }

    #[test]
    fn apply_checks_dimensions() {
        let mut d = make_test_design();
        let result = PlacementResult {
            positions: vec![0.0; 2],
            rotations: vec![0.0; 4],
            cost: CostBreakdown::default(),
            evaluations: 0,
            accepted: 0,
        };
        assert!(matches!(
            result.apply(&mut d),
            Err(PlaceError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn empty_design_places_trivially() {
        let mut d = Design::new();
        let result = Placer::new(config(0)).optimize(&mut d, &bounds()).unwrap();
        assert!(result.positions.is_empty());
        assert_eq!(result.cost.total, 0.0);
        assert_eq!(result.evaluations, 1);
    }
}
