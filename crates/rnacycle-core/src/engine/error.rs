use crate::core::models::graph::GraphError;
use thiserror::Error;

/// Failures to certify a complete, independent set of cycles.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BasisError {
    #[error("Candidate pool exhausted at rank {rank}, but the cycle space has dimension {dimension}")]
    IncompleteBasis { rank: usize, dimension: usize },

    #[error("Basis has {found} cycles, but the cycle space has dimension {dimension}")]
    WrongSize { found: usize, dimension: usize },

    #[error("Cycle {index} is a GF(2) combination of earlier cycles")]
    Dependent { index: usize },

    #[error("Cycle {index} is invalid: {reason}")]
    InvalidCycle { index: usize, reason: String },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Graph construction failed: {source}")]
    Graph {
        #[from]
        source: GraphError,
    },

    #[error("Cycle basis error: {source}")]
    Basis {
        #[from]
        source: BasisError,
    },

    #[error("Spanning forest construction failed: {0}")]
    Forest(String),

    #[error("Deadline exceeded after {elapsed_ms} ms")]
    DeadlineExceeded { elapsed_ms: u128 },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
