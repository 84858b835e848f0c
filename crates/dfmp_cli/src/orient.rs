//! `dfmp orient`: torque-balance the orientations of an existing placement.

use std::path::Path;

use dfmp_bookshelf::load_benchmark;

use crate::pipeline::{emit_placement, resolve_config};
use crate::{GlobalArgs, OrientArgs};

/// Runs the `dfmp orient` command.
///
/// Positions are left as loaded. Non-convergence of the root finder is
/// reported but not treated as a failure.
pub fn run(args: &OrientArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let bench_dir = Path::new(&args.bench);
    let config = resolve_config(global, bench_dir)?;
    let mut bench = load_benchmark(bench_dir)?;

    let report = dfmp_place::orient(&mut bench.design, &config.orient);
    emit_placement(&bench.design, args.output.as_deref())?;

    if !global.quiet {
        let status = if report.converged {
            "converged"
        } else {
            "did not converge"
        };
        eprintln!(
            "   Orient: {status} after {} iterations, residual torque {:.3e}",
            report.iterations, report.residual
        );
    }
    Ok(0)
}
