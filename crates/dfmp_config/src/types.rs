//! Configuration types deserialized from `dfmp.toml`.

use serde::{Deserialize, Serialize};

/// The top-level optimizer configuration parsed from `dfmp.toml`.
///
/// Every section is optional; an empty file yields the defaults used by the
/// reference flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacerConfig {
    /// Simulated annealing schedule for the position search.
    #[serde(default)]
    pub anneal: AnnealConfig,
    /// Root-finder settings for the orientation solve.
    #[serde(default)]
    pub orient: OrientConfig,
    /// Cost function weights.
    #[serde(default)]
    pub cost: CostConfig,
    /// Search-space settings.
    #[serde(default)]
    pub placement: PlacementConfig,
}

/// Annealing schedule for the global position search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealConfig {
    /// Starting temperature.
    pub initial_temperature: f64,
    /// Multiplier applied to the temperature after each step.
    pub cooling_rate: f64,
    /// Annealing stops once the temperature drops below this value.
    pub min_temperature: f64,
    /// Moves per temperature step. `0` means ten per macro.
    pub moves_per_temperature: usize,
    /// Hard cap on cost evaluations over the whole run.
    pub max_evaluations: usize,
    /// Perturbation radius at the initial temperature, as a fraction of the
    /// layout span. Shrinks with the temperature.
    pub step_fraction: f64,
    /// Seed for reproducible runs. Uses entropy when absent.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 5230.0,
            cooling_rate: 0.95,
            min_temperature: 0.01,
            moves_per_temperature: 0,
            max_evaluations: 10_000,
            step_fraction: 0.25,
            seed: None,
        }
    }
}

/// Root-finder settings for the torque-balance orientation solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientConfig {
    /// Maximum quasi-Newton iterations per solve.
    pub max_iterations: usize,
    /// Convergence threshold on the largest absolute torque component.
    pub f_tol: f64,
    /// Backtrack steps that increase the residual norm.
    pub line_search: bool,
    /// Start each solve from the previous snapped rotations instead of zero.
    pub warm_start: bool,
}

impl Default for OrientConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            f_tol: 1.0,
            line_search: true,
            warm_start: true,
        }
    }
}

/// Weights of the scalar placement cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Weight of the bounding-box area term.
    pub area: f64,
    /// Weight of the wirelength term.
    pub hpwl: f64,
    /// Weight of the dataflow energy term.
    pub energy: f64,
    /// Weight of the pairwise overlap term.
    pub overlap: f64,
    /// Weight of the out-of-bounds overflow term.
    pub overflow: f64,
    /// Wirelength model feeding the `hpwl` term.
    pub wirelength: WirelengthModel,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            area: 1.0,
            hpwl: 1.0,
            energy: 1.0,
            overlap: 100.0,
            overflow: 100.0,
            wirelength: WirelengthModel::default(),
        }
    }
}

/// Which wirelength estimate feeds the cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WirelengthModel {
    /// Wirelength is not modeled; the term is always zero.
    #[default]
    Disabled,
    /// Sum over nets of the half perimeter of the pins' bounding box.
    HalfPerimeter,
}

/// Search-space settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// How macros flagged as fixed terminals are treated.
    pub fixed_macros: FixedMacroPolicy,
}

/// Treatment of fixed terminal macros by the position search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedMacroPolicy {
    /// Fixed macros are searched like any other macro.
    #[default]
    Movable,
    /// Fixed macros keep their loaded positions.
    Pinned,
}
