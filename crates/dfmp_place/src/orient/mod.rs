//! Torque-balanced orientation of macros.
//!
//! For a fixed set of positions, each macro's rotation is chosen so that the
//! net torque from its connections vanishes. The continuous rotations are
//! found with a [`RootFinder`] over the whole rotation vector and then
//! snapped to the four manufacturable orientations.

mod broyden;
mod torque;

pub use broyden::Broyden;
pub use torque::{cross_z, torque_vector};

use crate::solver::{RootFinder, RootOptions, RootOutcome};
use dfmp_config::OrientConfig;
use dfmp_model::{Design, Orientation};
use nalgebra::DVector;

/// Summary of one orientation solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientReport {
    /// Whether the root finder met its tolerance.
    pub converged: bool,
    /// Root-finder iterations performed.
    pub iterations: usize,
    /// Largest absolute torque at the continuous estimate.
    pub residual: f64,
}

/// Runs orientation solves and keeps the warm-start state between them.
pub struct OrientEngine {
    finder: Box<dyn RootFinder>,
    options: RootOptions,
    warm_start: bool,
    rotations: Vec<f64>,
}

impl OrientEngine {
    /// Creates an engine for a design with `macro_count` macros, using
    /// [`Broyden`] as the root finder.
    pub fn new(macro_count: usize, config: &OrientConfig) -> Self {
        Self::with_finder(macro_count, config, Box::new(Broyden::new()))
    }

    /// Creates an engine with a custom root finder.
    pub fn with_finder(
        macro_count: usize,
        config: &OrientConfig,
        finder: Box<dyn RootFinder>,
    ) -> Self {
        Self {
            finder,
            options: RootOptions {
                max_iterations: config.max_iterations,
                f_tol: config.f_tol,
                line_search: config.line_search,
            },
            warm_start: config.warm_start,
            rotations: vec![0.0; macro_count],
        }
    }

    /// Returns the snapped rotations of the last solve, in arena order.
    pub fn rotations(&self) -> &[f64] {
        &self.rotations
    }

    /// Seeds the warm-start state, e.g. from rotations loaded with the design.
    pub fn set_rotations(&mut self, rotations: &[f64]) {
        self.rotations.clear();
        self.rotations
            .extend(rotations.iter().map(|&r| Orientation::snap(r).degrees()));
    }

    /// Balances the torque on every macro at its current position, snaps the
    /// result and writes it into `design`.
    ///
    /// Non-convergence is logged and the last estimate is used. A non-finite
    /// estimate is discarded in favour of the previous rotations.
    pub fn settle(&mut self, design: &mut Design) -> OrientReport {
        let n = design.macro_count();
        if self.rotations.len() != n {
            self.rotations = vec![0.0; n];
        }

        let initial = if self.warm_start {
            DVector::from_column_slice(&self.rotations)
        } else {
            DVector::zeros(n)
        };

        let outcome = {
            let mut objective = |theta: &DVector<f64>| {
                design.apply_rotations(theta.as_slice());
                torque_vector(design)
            };
            self.finder.solve(&mut objective, initial, &self.options)
        };

        let report = OrientReport {
            converged: outcome.is_converged(),
            iterations: outcome.iterations(),
            residual: outcome.residual(),
        };
        if let RootOutcome::Unconverged {
            iterations,
            residual,
            ref reason,
            ..
        } = outcome
        {
            log::warn!(
                "orientation solve did not converge after {iterations} iterations \
                 (max torque {residual:.3e}): {reason}; using last estimate"
            );
        }

        let estimate = outcome.into_estimate();
        if estimate.iter().all(|r| r.is_finite()) {
            for (slot, &r) in self.rotations.iter_mut().zip(estimate.iter()) {
                *slot = Orientation::snap(r).degrees();
            }
        } else {
            log::warn!("orientation estimate is not finite; keeping previous rotations");
        }
        design.apply_rotations(&self.rotations);
        report
    }
}

impl std::fmt::Debug for OrientEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrientEngine")
            .field("options", &self.options)
            .field("warm_start", &self.warm_start)
            .field("rotations", &self.rotations)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfmp_model::{Macro, PortDirection, Vector2};

    /// Returns a fixed outcome regardless of the objective.
    struct Canned(RootOutcome);

    impl RootFinder for Canned {
        fn solve(
            &self,
            objective: &mut dyn FnMut(&DVector<f64>) -> DVector<f64>,
            initial: DVector<f64>,
            _options: &RootOptions,
        ) -> RootOutcome {
            objective(&initial);
            self.0.clone()
        }
    }

    fn pair() -> Design {
        let mut d = Design::new();
        let a = d.add_macro(Macro::new("a", 2.0, 2.0, false)).unwrap();
        let b = d.add_macro(Macro::new("b", 2.0, 2.0, false)).unwrap();
        d.macro_mut(a).set_position(0.0, 0.0);
        d.macro_mut(b).set_position(10.0, 0.0);
        let n = d.add_net("n").unwrap();
        d.connect(n, a, PortDirection::Output, Vector2::new(1.0, 0.0))
            .unwrap();
        d.connect(n, b, PortDirection::Input, Vector2::new(-1.0, 0.0))
            .unwrap();
        d
    }

    fn assert_snapped(d: &Design) {
        for m in d.macros() {
            let r = m.rotation();
            assert!(Orientation::ALL.iter().any(|o| o.degrees() == r), "{r}");
        }
    }

    #[test]
    fn balanced_design_stays_unrotated() {
        let mut d = pair();
        let mut engine = OrientEngine::new(2, &OrientConfig::default());
        let report = engine.settle(&mut d);
        assert!(report.converged);
        assert_eq!(report.iterations, 0);
        assert_eq!(d.rotations(), vec![0.0, 0.0]);
    }

    #[test]
    fn settle_always_snaps() {
        let mut d = pair();
        let b = d.macro_id("b").unwrap();
        d.macro_mut(b).set_position(3.0, 12.0);
        let mut engine = OrientEngine::new(2, &OrientConfig::default());
        engine.settle(&mut d);
        assert_snapped(&d);
        assert_eq!(engine.rotations(), d.rotations().as_slice());
    }

    #[test]
    fn unconverged_uses_last_estimate() {
        let mut d = pair();
        let canned = Canned(RootOutcome::Unconverged {
            last_estimate: DVector::from_vec(vec![100.0, 190.0]),
            iterations: 200,
            residual: 7.0,
            reason: "test".into(),
        });
        let mut engine =
            OrientEngine::with_finder(2, &OrientConfig::default(), Box::new(canned));
        let report = engine.settle(&mut d);
        assert!(!report.converged);
        assert_eq!(report.iterations, 200);
        assert_eq!(d.rotations(), vec![90.0, 180.0]);
    }

    #[test]
    fn non_finite_estimate_keeps_previous_state() {
        let mut d = pair();
        let canned = Canned(RootOutcome::Unconverged {
            last_estimate: DVector::from_vec(vec![f64::NAN, 0.0]),
            iterations: 1,
            residual: f64::INFINITY,
            reason: "test".into(),
        });
        let mut engine =
            OrientEngine::with_finder(2, &OrientConfig::default(), Box::new(canned));
        engine.set_rotations(&[270.0, 90.0]);
        engine.settle(&mut d);
        assert_eq!(d.rotations(), vec![270.0, 90.0]);
    }

    #[test]
    fn set_rotations_snaps_seed() {
        let mut engine = OrientEngine::new(3, &OrientConfig::default());
        engine.set_rotations(&[44.0, 200.0, -90.0]);
        assert_eq!(engine.rotations(), &[0.0, 180.0, 270.0]);
    }

    #[test]
    fn engine_resizes_to_design() {
        let mut d = pair();
        let mut engine = OrientEngine::new(0, &OrientConfig::default());
        engine.settle(&mut d);
        assert_eq!(engine.rotations().len(), 2);
    }

    #[test]
    fn cold_start_ignores_previous_rotations() {
        let mut d = pair();
        let config = OrientConfig {
            warm_start: false,
            ..OrientConfig::default()
        };
        let mut engine = OrientEngine::new(2, &config);
        engine.set_rotations(&[180.0, 180.0]);
        let report = engine.settle(&mut d);
        // balanced at zero, so a cold start converges immediately
        assert_eq!(report.iterations, 0);
        assert_eq!(d.rotations(), vec![0.0, 0.0]);
    }
}
