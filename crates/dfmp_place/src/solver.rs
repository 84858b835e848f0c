//! Strategy interfaces for the two numeric searches.
//!
//! The orientation solve needs a root finder and the position search needs a
//! bounded global minimizer. Both are traits so alternative methods can be
//! plugged in; [`Broyden`](crate::orient::Broyden) and
//! [`Annealer`](crate::placement::Annealer) are the defaults.

use crate::error::PlaceError;
use nalgebra::DVector;

/// Stopping criteria for a root finder.
#[derive(Debug, Clone, PartialEq)]
pub struct RootOptions {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Converged once every residual component satisfies `|f_i| <= f_tol`.
    pub f_tol: f64,
    /// Backtrack steps that increase the residual norm.
    pub line_search: bool,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            f_tol: 1.0,
            line_search: true,
        }
    }
}

/// Result of a root-finding run.
///
/// Non-convergence is an ordinary outcome, not an error: the caller decides
/// whether the last estimate is good enough.
#[derive(Debug, Clone, PartialEq)]
pub enum RootOutcome {
    /// The residual dropped below the tolerance.
    Converged {
        /// The root.
        solution: DVector<f64>,
        /// Iterations performed.
        iterations: usize,
        /// Largest absolute residual component at `solution`.
        residual: f64,
    },
    /// The budget ran out or the method stalled.
    Unconverged {
        /// Estimate held when the iteration stopped. Not necessarily the
        /// point with the smallest residual seen.
        last_estimate: DVector<f64>,
        /// Iterations performed.
        iterations: usize,
        /// Largest absolute residual component at `last_estimate`.
        residual: f64,
        /// Why the iteration stopped.
        reason: String,
    },
}

impl RootOutcome {
    /// Returns the solution or the last estimate.
    pub fn estimate(&self) -> &DVector<f64> {
        match self {
            RootOutcome::Converged { solution, .. } => solution,
            RootOutcome::Unconverged { last_estimate, .. } => last_estimate,
        }
    }

    /// Consumes the outcome, returning the solution or the last estimate.
    pub fn into_estimate(self) -> DVector<f64> {
        match self {
            RootOutcome::Converged { solution, .. } => solution,
            RootOutcome::Unconverged { last_estimate, .. } => last_estimate,
        }
    }

    /// Returns whether the tolerance was met.
    pub fn is_converged(&self) -> bool {
        matches!(self, RootOutcome::Converged { .. })
    }

    /// Returns the number of iterations performed.
    pub fn iterations(&self) -> usize {
        match self {
            RootOutcome::Converged { iterations, .. }
            | RootOutcome::Unconverged { iterations, .. } => *iterations,
        }
    }

    /// Returns the largest absolute residual component at the estimate.
    pub fn residual(&self) -> f64 {
        match self {
            RootOutcome::Converged { residual, .. }
            | RootOutcome::Unconverged { residual, .. } => *residual,
        }
    }
}

/// Solves `f(x) = 0` for a vector-valued `f`.
pub trait RootFinder {
    /// Runs the iteration from `initial`.
    fn solve(
        &self,
        objective: &mut dyn FnMut(&DVector<f64>) -> DVector<f64>,
        initial: DVector<f64>,
        options: &RootOptions,
    ) -> RootOutcome;
}

/// A box-constrained search space.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSpace {
    /// Starting point.
    pub initial: Vec<f64>,
    /// Inclusive `(low, high)` per coordinate.
    pub bounds: Vec<(f64, f64)>,
    /// Coordinates the optimizer must leave at their initial value.
    pub frozen: Vec<bool>,
}

impl SearchSpace {
    /// Creates a space with no frozen coordinates.
    pub fn new(initial: Vec<f64>, bounds: Vec<(f64, f64)>) -> Self {
        let frozen = vec![false; initial.len()];
        Self {
            initial,
            bounds,
            frozen,
        }
    }

    /// Returns the number of coordinates.
    pub fn dimension(&self) -> usize {
        self.initial.len()
    }

    /// Returns the indices of the coordinates that may move.
    pub fn free_coordinates(&self) -> Vec<usize> {
        (0..self.dimension()).filter(|&i| !self.frozen[i]).collect()
    }
}

/// The best point found by a [`GlobalOptimizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    /// Best point.
    pub x: Vec<f64>,
    /// Objective value at `x`.
    pub value: f64,
    /// Objective evaluations performed, including the initial point.
    pub evaluations: usize,
    /// Moves accepted by the search.
    pub accepted: usize,
}

/// Minimizes a scalar objective over a [`SearchSpace`].
///
/// The objective is fallible so a structural failure (a cyclic dataflow
/// graph) stops the search instead of being scored.
pub trait GlobalOptimizer {
    /// Runs the search. Never returns a point worse than `space.initial`.
    fn minimize(
        &mut self,
        objective: &mut dyn FnMut(&[f64]) -> Result<f64, PlaceError>,
        space: &SearchSpace,
    ) -> Result<Minimum, PlaceError>;
}

/// Returns the largest absolute component, or 0 for an empty vector.
pub(crate) fn max_abs(v: &DVector<f64>) -> f64 {
    v.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()))
}
