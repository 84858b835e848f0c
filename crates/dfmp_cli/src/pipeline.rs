//! Shared helpers for CLI commands: logging setup, configuration lookup and
//! placement output.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use dfmp_config::PlacerConfig;
use dfmp_model::Design;

use crate::GlobalArgs;

/// Returns the log level implied by `--quiet` and `--verbose`.
///
/// `--quiet` wins when both are given.
pub fn log_level(global: &GlobalArgs) -> log::LevelFilter {
    if global.quiet {
        log::LevelFilter::Error
    } else if global.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Installs the `env_logger` backend. `RUST_LOG` overrides the flag level.
pub fn init_logging(global: &GlobalArgs) {
    env_logger::Builder::new()
        .filter_level(log_level(global))
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Loads the configuration from `--config`, or from `dfmp.toml` in the
/// benchmark directory, falling back to the defaults.
pub fn resolve_config(
    global: &GlobalArgs,
    bench_dir: &Path,
) -> Result<PlacerConfig, Box<dyn std::error::Error>> {
    let config = match global.config {
        Some(ref path) => dfmp_config::load_config(&PathBuf::from(path))?,
        None => dfmp_config::load_config_or_default(bench_dir)?,
    };
    Ok(config)
}

/// Writes the placement of `design` to `output`, or to stdout when `None`.
pub fn emit_placement(
    design: &Design,
    output: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => dfmp_bookshelf::save_placement(design, Path::new(path))?,
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            dfmp_bookshelf::write_pl(design, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}
