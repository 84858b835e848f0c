//! Error types for placement runs.

use dfmp_model::{MacroId, ModelError};

/// The dataflow graph contains a cycle, so its longest path is undefined.
///
/// Raised by [`DataflowGraph::longest_path`](crate::dataflow::DataflowGraph::longest_path)
/// instead of choosing an arbitrary path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("dataflow graph contains a cycle through macro {macro_id}")]
pub struct CyclicDataflowError {
    /// A macro that lies on the cycle.
    pub macro_id: MacroId,
}

/// Errors that abort a placement run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaceError {
    /// A cost evaluation hit a cyclic dataflow graph.
    #[error(transparent)]
    Cyclic(#[from] CyclicDataflowError),

    /// The design or bounds violate a structural invariant.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A position or rotation vector does not match the design's macro count.
    #[error("expected {expected} values, got {actual}")]
    DimensionMismatch {
        /// Required vector length.
        expected: usize,
        /// Supplied vector length.
        actual: usize,
    },
}
