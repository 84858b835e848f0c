//! `dfmp place`: full placement run on a Bookshelf benchmark.
//!
//! 1. Load the benchmark and its configuration
//! 2. Apply `--seed` / `--max-evals` overrides
//! 3. Anneal positions, balancing orientations per candidate
//! 4. Install the best configuration and write the `.pl` output

use std::path::Path;

use dfmp_bookshelf::load_benchmark;
use dfmp_config::{validate_config, PlacerConfig};

use crate::pipeline::{emit_placement, resolve_config};
use crate::{GlobalArgs, PlaceArgs};

/// Runs the `dfmp place` command.
pub fn run(args: &PlaceArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let bench_dir = Path::new(&args.bench);
    let mut config = resolve_config(global, bench_dir)?;
    apply_overrides(&mut config, args);
    validate_config(&config)?;

    let mut bench = load_benchmark(bench_dir)?;
    if !global.quiet {
        eprintln!(
            "   Placing {} ({} macros, {} nets) in {}",
            bench.name,
            bench.design.macro_count(),
            bench.design.net_count(),
            bench.bounds
        );
    }

    let result = dfmp_place::place(&mut bench.design, &bench.bounds, &config)?;
    emit_placement(&bench.design, args.output.as_deref())?;

    if !global.quiet {
        let c = &result.cost;
        eprintln!(
            "   Result: cost {:.3} (area {:.3}, energy {:.3}, overlap {:.3}, overflow {:.3}, hpwl {:.3})",
            c.total, c.area, c.energy, c.overlap, c.overflow, c.hpwl
        );
        eprintln!(
            "   {} evaluations, {} accepted moves",
            result.evaluations, result.accepted
        );
    }
    Ok(0)
}

fn apply_overrides(config: &mut PlacerConfig, args: &PlaceArgs) {
    if let Some(seed) = args.seed {
        config.anneal.seed = Some(seed);
    }
    if let Some(max) = args.max_evals {
        config.anneal.max_evaluations = max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_bench(dir: &Path) {
        fs::write(dir.join("t.nodes"), "a 10 10\nb 10 10\nc 5 5\n").unwrap();
        fs::write(dir.join("t.pl"), "a 0 10 : N\nb 20 10 : N\nc 40 5 : N\n").unwrap();
        fs::write(
            dir.join("t.nets"),
            "NetDegree : 2 n0\n a O : 5 0\n b I : -5 0\n\
             NetDegree : 2 n1\n b O : 0 5\n c I : 0 -2.5\n",
        )
        .unwrap();
        fs::write(
            dir.join("t.scl"),
            "CoreRow Horizontal\n Coordinate : 0\n Height : 60\n \
             SubrowOrigin : 0 NumSites : 60\nEnd\n",
        )
        .unwrap();
    }

    fn args(bench: &Path, output: &Path) -> PlaceArgs {
        PlaceArgs {
            bench: bench.display().to_string(),
            output: Some(output.display().to_string()),
            seed: Some(3),
            max_evals: Some(200),
        }
    }

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            config: None,
        }
    }

    #[test]
    fn overrides_replace_config_values() {
        let mut config = PlacerConfig::default();
        let a = PlaceArgs {
            bench: String::new(),
            output: None,
            seed: Some(11),
            max_evals: Some(77),
        };
        apply_overrides(&mut config, &a);
        assert_eq!(config.anneal.seed, Some(11));
        assert_eq!(config.anneal.max_evaluations, 77);
    }

    #[test]
    fn place_writes_output() {
        let tmp = tempfile::tempdir().unwrap();
        write_bench(tmp.path());
        let out = tmp.path().join("placed.out");
        let code = run(&args(tmp.path(), &out), &quiet()).unwrap();
        assert_eq!(code, 0);

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("UCLA pl 1.0"));
        for name in ["a", "b", "c"] {
            assert!(text.lines().any(|l| l.starts_with(&format!("{name} "))));
        }
    }

    #[test]
    fn place_is_reproducible_with_seed() {
        let tmp = tempfile::tempdir().unwrap();
        write_bench(tmp.path());
        let first = tmp.path().join("first.out");
        let second = tmp.path().join("second.out");
        run(&args(tmp.path(), &first), &quiet()).unwrap();
        run(&args(tmp.path(), &second), &quiet()).unwrap();
        assert_eq!(
            fs::read_to_string(first).unwrap(),
            fs::read_to_string(second).unwrap()
        );
    }

    #[test]
    fn missing_benchmark_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("x.out");
        assert!(run(&args(&tmp.path().join("none"), &out), &quiet()).is_err());
    }

    #[test]
    fn invalid_override_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_bench(tmp.path());
        let mut a = args(tmp.path(), &tmp.path().join("x.out"));
        a.max_evals = Some(0);
        let err = run(&a, &quiet()).unwrap_err();
        assert!(err.to_string().contains("max_evaluations"), "{err}");
    }
}
