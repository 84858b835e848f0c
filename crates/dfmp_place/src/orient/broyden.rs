//! Broyden's second ("bad") quasi-Newton method.
//!
//! Keeps a dense approximation `H` of the inverse Jacobian and updates it
//! from each secant pair `(s, y) = (x' - x, f' - f)`:
//!
//! ```text
//! H' = H + (s - H y) yᵀ / (yᵀ y)
//! ```
//!
//! The step is `-H f`, optionally shortened by halving until the residual
//! norm decreases. Only function values are needed, which suits the torque
//! objective: it is cheap to evaluate but has no closed-form derivative.

use crate::solver::{max_abs, RootFinder, RootOptions, RootOutcome};
use nalgebra::{DMatrix, DVector};

/// Number of step halvings tried before falling back to the full step.
const MAX_BACKTRACKS: usize = 10;

/// Secant denominators below this are treated as a stalled iteration.
const MIN_SECANT_NORM: f64 = 1e-300;

/// Broyden root finder with a dense inverse-Jacobian approximation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Broyden;

impl Broyden {
    /// Creates the solver.
    pub fn new() -> Self {
        Self
    }
}

impl RootFinder for Broyden {
    fn solve(
        &self,
        objective: &mut dyn FnMut(&DVector<f64>) -> DVector<f64>,
        initial: DVector<f64>,
        options: &RootOptions,
    ) -> RootOutcome {
        let n = initial.len();
        let mut x = initial;
        let mut f = objective(&x);

        if !is_finite(&f) {
            return RootOutcome::Unconverged {
                last_estimate: x,
                iterations: 0,
                residual: f64::INFINITY,
                reason: "objective is not finite at the initial point".into(),
            };
        }

        let mut residual = max_abs(&f);
        if residual <= options.f_tol {
            return RootOutcome::Converged {
                solution: x,
                iterations: 0,
                residual,
            };
        }

        let alpha = 0.5 * x.norm().max(1.0) / f.norm();
        let mut h = DMatrix::<f64>::identity(n, n) * -alpha;

        for iteration in 1..=options.max_iterations {
            let dx = -(&h * &f);
            let Some((x_new, f_new)) = take_step(objective, &x, &f, &dx, options.line_search)
            else {
                return RootOutcome::Unconverged {
                    last_estimate: x,
                    iterations: iteration,
                    residual,
                    reason: "objective is not finite along the search direction".into(),
                };
            };

            let s = &x_new - &x;
            let y = &f_new - &f;
            x = x_new;
            f = f_new;
            residual = max_abs(&f);

            if residual <= options.f_tol {
                return RootOutcome::Converged {
                    solution: x,
                    iterations: iteration,
                    residual,
                };
            }

            let denom = y.dot(&y);
            if denom < MIN_SECANT_NORM {
                return RootOutcome::Unconverged {
                    last_estimate: x,
                    iterations: iteration,
                    residual,
                    reason: "residual stopped changing".into(),
                };
            }
            let correction = (&s - &h * &y) / denom;
            h += correction * y.transpose();
        }

        RootOutcome::Unconverged {
            last_estimate: x,
            iterations: options.max_iterations,
            residual,
            reason: format!("no convergence after {} iterations", options.max_iterations),
        }
    }
}

/// Evaluates `x + t·dx` for `t = 1, 1/2, 1/4, …` and returns the first point
/// that lowers the residual norm. Without line search, or when no halving
/// helps, the full step is taken if it is finite.
fn take_step(
    objective: &mut dyn FnMut(&DVector<f64>) -> DVector<f64>,
    x: &DVector<f64>,
    f: &DVector<f64>,
    dx: &DVector<f64>,
    line_search: bool,
) -> Option<(DVector<f64>, DVector<f64>)> {
    let full_x = x + dx;
    let full_f = objective(&full_x);
    let full = (is_finite(&full_x) && is_finite(&full_f)).then_some((full_x, full_f));

    if !line_search {
        return full;
    }

    let norm = f.norm();
    if full.as_ref().is_some_and(|(_, ff)| ff.norm() < norm) {
        return full;
    }

    let mut t = 0.5;
    for _ in 0..MAX_BACKTRACKS {
        let trial_x = x + dx * t;
        let trial_f = objective(&trial_x);
        if is_finite(&trial_x) && is_finite(&trial_f) && trial_f.norm() < norm {
            return Some((trial_x, trial_f));
        }
        t *= 0.5;
    }

    full
}

fn is_finite(v: &DVector<f64>) -> bool {
    v.iter().all(|x| x.is_finite())
}
