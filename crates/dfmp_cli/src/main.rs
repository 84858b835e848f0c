//! dfmp CLI: dataflow-driven macro placement for Bookshelf benchmarks.
//!
//! Provides `dfmp place` for a full annealing run, `dfmp orient` for
//! torque-balancing the rotations of an existing placement, and `dfmp subset`
//! for cutting a smaller benchmark out of a large one.

#![warn(missing_docs)]

mod orient;
mod pipeline;
mod place;
mod subset;

use std::process;

use clap::{Parser, Subcommand};

/// dfmp: dataflow-driven macro placement.
#[derive(Parser, Debug)]
#[command(name = "dfmp", version, about = "Dataflow-driven macro placer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a `dfmp.toml` configuration file. Defaults to `dfmp.toml` in
    /// the benchmark directory, if present.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search macro positions and orientations for a benchmark.
    Place(PlaceArgs),
    /// Balance macro orientations at the benchmark's current positions.
    Orient(OrientArgs),
    /// Write a smaller benchmark made of the first nets of another.
    Subset(SubsetArgs),
}

/// Arguments for the `dfmp place` subcommand.
#[derive(Parser, Debug)]
pub struct PlaceArgs {
    /// Benchmark directory holding `.nodes`, `.nets`, `.pl` and optionally
    /// `.scl` files.
    pub bench: String,

    /// Output `.pl` path. The placement is printed to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Random seed, overriding `anneal.seed` from the configuration.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Cost evaluation budget, overriding `anneal.max_evaluations`.
    #[arg(long)]
    pub max_evals: Option<usize>,
}

/// Arguments for the `dfmp orient` subcommand.
#[derive(Parser, Debug)]
pub struct OrientArgs {
    /// Benchmark directory.
    pub bench: String,

    /// Output `.pl` path. The placement is printed to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for the `dfmp subset` subcommand.
#[derive(Parser, Debug)]
pub struct SubsetArgs {
    /// Benchmark directory to read.
    pub bench: String,

    /// Directory to write the smaller benchmark into.
    pub out_dir: String,

    /// Number of nets to keep, in file order.
    #[arg(long, default_value_t = 500)]
    pub max_nets: usize,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    pipeline::init_logging(&global);

    let result = match cli.command {
        Command::Place(ref args) => place::run(args, &global),
        Command::Orient(ref args) => orient::run(args, &global),
        Command::Subset(ref args) => subset::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
