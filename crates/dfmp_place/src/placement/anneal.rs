//! Simulated annealing over a box-constrained vector.
//!
//! Starting from the initial point, repeatedly perturbs one free coordinate
//! and accepts or rejects the move using the Metropolis criterion. The
//! temperature decreases geometrically, which both lowers the acceptance
//! probability of cost-increasing moves and shrinks the perturbation radius.

use crate::error::PlaceError;
use crate::solver::{GlobalOptimizer, Minimum, SearchSpace};
use dfmp_config::AnnealConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Moves per temperature step per free coordinate when the configuration
/// leaves it at 0. Two coordinates per macro gives ten moves per macro.
const MOVES_PER_COORDINATE: usize = 5;

/// Annealing stops early once fewer than this fraction of moves is accepted
/// in a temperature step.
const MIN_ACCEPTANCE_RATE: f64 = 0.001;

/// Smallest perturbation radius, as a fraction of the full-temperature one.
const MIN_STEP_SCALE: f64 = 1e-3;

/// Simulated annealing minimizer.
#[derive(Debug, Clone)]
pub struct Annealer {
    config: AnnealConfig,
    rng: StdRng,
}

impl Annealer {
    /// Creates an annealer. Seeded from `config.seed` when present, from
    /// entropy otherwise.
    pub fn new(config: &AnnealConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config: config.clone(),
            rng,
        }
    }

    /// Returns the random number generator, e.g. to draw the initial point
    /// from the same seeded stream.
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl GlobalOptimizer for Annealer {
    fn minimize(
        &mut self,
        objective: &mut dyn FnMut(&[f64]) -> Result<f64, PlaceError>,
        space: &SearchSpace,
    ) -> Result<Minimum, PlaceError> {
        let free = space.free_coordinates();
        let mut current = space.initial.clone();
        let mut current_cost = objective(&current)?;
        let mut evaluations = 1;
        let mut accepted_total = 0;

        let mut best = current.clone();
        let mut best_cost = current_cost;

        let max_evaluations = self.config.max_evaluations;
        if free.is_empty() || evaluations >= max_evaluations {
            return Ok(Minimum {
                x: best,
                value: best_cost,
                evaluations,
                accepted: 0,
            });
        }

        let moves_per_temp = match self.config.moves_per_temperature {
            0 => MOVES_PER_COORDINATE * free.len(),
            n => n,
        };
        let t0 = self.config.initial_temperature;
        let mut temperature = t0;

        log::info!(
            "annealing {} coordinates: T0 = {t0}, {moves_per_temp} moves per step, \
             initial cost {current_cost:.6e}",
            free.len()
        );

        'outer: while temperature > self.config.min_temperature {
            let step_scale = self.config.step_fraction * (temperature / t0).max(MIN_STEP_SCALE);
            let mut accepted = 0;
            let mut attempted = 0;

            for _ in 0..moves_per_temp {
                if evaluations >= max_evaluations {
                    break 'outer;
                }

                let i = free[self.rng.gen_range(0..free.len())];
                let (lo, hi) = space.bounds[i];
                let radius = (hi - lo) * step_scale;
                let old = current[i];
                current[i] = (old + self.rng.gen_range(-radius..=radius)).clamp(lo, hi);

                let new_cost = objective(&current)?;
                evaluations += 1;
                attempted += 1;
                let delta = new_cost - current_cost;

                // Metropolis criterion
                if delta <= 0.0 || self.rng.gen::<f64>() < (-delta / temperature).exp() {
                    current_cost = new_cost;
                    accepted += 1;
                    if current_cost < best_cost {
                        best_cost = current_cost;
                        best.clone_from(&current);
                    }
                } else {
                    current[i] = old;
                }
            }

            accepted_total += accepted;
            log::info!(
                "T = {temperature:.4e}: accepted {accepted}/{attempted}, \
                 current {current_cost:.6e}, best {best_cost:.6e}"
            );

            temperature *= self.config.cooling_rate;

            let acceptance_rate = accepted as f64 / moves_per_temp as f64;
            if acceptance_rate < MIN_ACCEPTANCE_RATE {
                break;
            }
        }

        log::info!(
            "annealing finished after {evaluations} evaluations: best cost {best_cost:.6e}"
        );

        Ok(Minimum {
            x: best,
            value: best_cost,
            evaluations,
            accepted: accepted_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CyclicDataflowError;
    use dfmp_model::MacroId;

    fn config(seed: u64) -> AnnealConfig {
        AnnealConfig {
            initial_temperature: 10.0,
            max_evaluations: 2_000,
            seed: Some(seed),
            ..AnnealConfig::default()
        }
    }

    fn bowl(x: &[f64]) -> Result<f64, PlaceError> {
        Ok((x[0] - 3.0).powi(2) + (x[1] + 2.0).powi(2))
    }

    #[test]
    fn finds_bowl_minimum() {
        let space = SearchSpace::new(vec![-9.0, 9.0], vec![(-10.0, 10.0); 2]);
        let min = Annealer::new(&config(7))
            .minimize(&mut bowl, &space)
            .unwrap();
        assert!(min.value < 1.0, "{min:?}");
        assert!(min.evaluations <= 2_000);
    }

    #[test]
    fn never_worse_than_start() {
        let space = SearchSpace::new(vec![3.0, -2.0], vec![(-10.0, 10.0); 2]);
        let min = Annealer::new(&config(1))
            .minimize(&mut bowl, &space)
            .unwrap();
        assert_eq!(min.value, 0.0);
        assert_eq!(min.x, vec![3.0, -2.0]);
    }

    #[test]
    fn stays_inside_bounds() {
        let space = SearchSpace::new(vec![0.5, 0.5], vec![(0.0, 1.0), (0.0, 1.0)]);
        // minimum far outside the box: the search should pin to the corner
        let mut objective = |x: &[f64]| -> Result<f64, PlaceError> {
            assert!(x.iter().all(|v| (0.0..=1.0).contains(v)), "{x:?}");
            Ok((x[0] - 50.0).powi(2) + (x[1] - 50.0).powi(2))
        };
        let min = Annealer::new(&config(3))
            .minimize(&mut objective, &space)
            .unwrap();
        assert!(min.x[0] > 0.9 && min.x[1] > 0.9, "{min:?}");
    }

    #[test]
    fn frozen_coordinates_never_move() {
        let mut space = SearchSpace::new(vec![-9.0, 9.0], vec![(-10.0, 10.0); 2]);
        space.frozen[1] = true;
        let mut objective = |x: &[f64]| {
            assert_eq!(x[1], 9.0);
            bowl(x)
        };
        let min = Annealer::new(&config(5))
            .minimize(&mut objective, &space)
            .unwrap();
        assert_eq!(min.x[1], 9.0);
    }

    #[test]
    fn evaluation_budget_is_respected() {
        let space = SearchSpace::new(vec![0.0, 0.0], vec![(-10.0, 10.0); 2]);
        let mut calls = 0;
        let mut objective = |x: &[f64]| {
            calls += 1;
            bowl(x)
        };
        let cfg = AnnealConfig {
            initial_temperature: 1e6,
            max_evaluations: 25,
            ..config(9)
        };
        let min = Annealer::new(&cfg).minimize(&mut objective, &space).unwrap();
        assert_eq!(min.evaluations, 25);
        assert_eq!(calls, 25);
    }

    #[test]
    fn objective_error_aborts() {
        let space = SearchSpace::new(vec![0.0], vec![(0.0, 1.0)]);
        let mut objective = |_: &[f64]| -> Result<f64, PlaceError> {
            Err(CyclicDataflowError {
                macro_id: MacroId::from_raw(0),
            }
            .into())
        };
        let err = Annealer::new(&config(0))
            .minimize(&mut objective, &space)
            .unwrap_err();
        assert!(matches!(err, PlaceError::Cyclic(_)));
    }

    #[test]
    fn seeded_runs_are_deterministic() {
        let space = SearchSpace::new(vec![-9.0, 9.0], vec![(-10.0, 10.0); 2]);
        let a = Annealer::new(&config(42))
            .minimize(&mut bowl, &space)
            .unwrap();
        let b = Annealer::new(&config(42))
            .minimize(&mut bowl, &space)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unseeded_annealer_stays_in_bounds() {
        let space = SearchSpace::new(vec![-9.0, 9.0], vec![(-10.0, 10.0); 2]);
        let unseeded = AnnealConfig {
            seed: None,
            ..config(0)
        };
        let min = Annealer::new(&unseeded)
            .minimize(&mut bowl, &space)
            .unwrap();
        assert!(min.x.iter().all(|v| (-10.0..=10.0).contains(v)));
        assert!(min.value <= bowl(&space.initial).unwrap());
        assert!(min.evaluations <= unseeded.max_evaluations);
    }

    #[test]
    fn all_frozen_evaluates_once() {
        let mut space = SearchSpace::new(vec![1.0, 1.0], vec![(0.0, 2.0); 2]);
        space.frozen = vec![true, true];
        let min = Annealer::new(&config(0))
            .minimize(&mut bowl, &space)
            .unwrap();
        assert_eq!(min.evaluations, 1);
        assert_eq!(min.x, vec![1.0, 1.0]);
    }
}
