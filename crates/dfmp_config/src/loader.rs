//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::PlacerConfig;
use std::path::Path;

/// Default configuration file name looked up next to a benchmark.
pub const CONFIG_FILE_NAME: &str = "dfmp.toml";

/// Loads and validates a configuration file.
pub fn load_config(path: &Path) -> Result<PlacerConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Loads `<dir>/dfmp.toml` if it exists, otherwise returns the defaults.
pub fn load_config_or_default(dir: &Path) -> Result<PlacerConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        load_config(&path)
    } else {
        Ok(PlacerConfig::default())
    }
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<PlacerConfig, ConfigError> {
    let config: PlacerConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks that every numeric setting is inside its meaningful range.
pub fn validate_config(config: &PlacerConfig) -> Result<(), ConfigError> {
    let anneal = &config.anneal;
    if !(anneal.initial_temperature.is_finite() && anneal.initial_temperature > 0.0) {
        return invalid("anneal.initial_temperature must be positive");
    }
    if !(anneal.min_temperature > 0.0 && anneal.min_temperature < anneal.initial_temperature) {
        return invalid("anneal.min_temperature must be in (0, initial_temperature)");
    }
    if !(anneal.cooling_rate > 0.0 && anneal.cooling_rate < 1.0) {
        return invalid("anneal.cooling_rate must be in (0, 1)");
    }
    if anneal.max_evaluations == 0 {
        return invalid("anneal.max_evaluations must be at least 1");
    }
    if !(anneal.step_fraction > 0.0 && anneal.step_fraction <= 1.0) {
        return invalid("anneal.step_fraction must be in (0, 1]");
    }

    let orient = &config.orient;
    if orient.max_iterations == 0 {
        return invalid("orient.max_iterations must be at least 1");
    }
    if !(orient.f_tol.is_finite() && orient.f_tol > 0.0) {
        return invalid("orient.f_tol must be positive");
    }

    let cost = &config.cost;
    for (name, weight) in [
        ("area", cost.area),
        ("hpwl", cost.hpwl),
        ("energy", cost.energy),
        ("overlap", cost.overlap),
        ("overflow", cost.overflow),
    ] {
        if !(weight.is_finite() && weight >= 0.0) {
            return invalid(&format!("cost.{name} must be a non-negative number"));
        }
    }
    Ok(())
}

fn invalid(message: &str) -> Result<(), ConfigError> {
    Err(ConfigError::ValidationError(message.to_string()))
}
