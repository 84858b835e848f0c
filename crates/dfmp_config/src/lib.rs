//! Parsing and validation of `dfmp.toml` optimizer configuration files.
//!
//! This crate reads the optimizer configuration and produces a strongly-typed
//! [`PlacerConfig`] covering the annealing schedule, the orientation root
//! finder, the cost weights, and the treatment of fixed macros.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    load_config, load_config_from_str, load_config_or_default, validate_config, CONFIG_FILE_NAME,
};
pub use types::*;
