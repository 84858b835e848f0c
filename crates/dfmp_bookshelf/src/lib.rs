//! Readers and writers for the UCLA Bookshelf benchmark formats.
//!
//! A benchmark directory holds a `.nodes` file (macro sizes), a `.pl` file
//! (initial placement), a `.nets` file (connectivity with port directions and
//! offsets) and optionally a `.scl` file (placement rows, from which the
//! layout bounds are derived). [`load_benchmark`] reads all of them into a
//! [`dfmp_model::Design`].

#![warn(missing_docs)]

pub mod bench;
pub mod error;
mod lines;
pub mod nets;
pub mod nodes;
pub mod pl;
pub mod scl;
pub mod subset;

pub use bench::{
    load_benchmark, placement_bounds, save_placement, write_benchmark, Benchmark, BenchmarkFiles,
};
pub use error::BookshelfError;
pub use nets::{parse_nets, write_nets};
pub use nodes::{parse_nodes, write_nodes};
pub use pl::{parse_pl, write_pl};
pub use scl::{parse_scl, rows_bounds, Row};
pub use subset::subset;
