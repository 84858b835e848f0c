//! `dfmp subset`: cut a smaller benchmark out of a large one.

use std::path::Path;

use dfmp_bookshelf::{load_benchmark, subset, write_benchmark};

use crate::{GlobalArgs, SubsetArgs};

/// Runs the `dfmp subset` command.
///
/// The output files are named after the output directory.
pub fn run(args: &SubsetArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let bench = load_benchmark(Path::new(&args.bench))?;
    let small = subset(&bench.design, args.max_nets)?;

    let out_dir = Path::new(&args.out_dir);
    let basename = out_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| bench.name.clone());
    write_benchmark(&small, out_dir, &basename)?;

    if !global.quiet {
        eprintln!(
            "   Wrote {} ({} macros, {} nets) to {}",
            basename,
            small.macro_count(),
            small.net_count(),
            out_dir.display()
        );
    }
    Ok(0)
}
