//! Error types for aspbench-core

use thiserror::Error;

use crate::graph::StructuralFamily;

/// A graph could not be generated for the requested family and edge count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The target edge count violates a precondition of the family.
    #[error("{family} cannot produce {target} edges: {reason}")]
    InvalidTarget {
        family: StructuralFamily,
        target: usize,
        reason: String,
    },

    /// Rejection sampling gave up before a draw hit the target exactly.
    #[error("{family} did not produce exactly {target} edges within {attempts} draws")]
    AttemptsExhausted {
        family: StructuralFamily,
        target: usize,
        attempts: u32,
    },

    /// A closed-form construction broke its own invariant.
    #[error("internal invariant violated for {family} with {target} edges: {reason}")]
    Internal {
        family: StructuralFamily,
        target: usize,
        reason: String,
    },
}

/// Main error type for instance encoding, decoding and caching.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// A line of fact text could not be parsed.
    #[error("malformed fact on line {line}: {text:?}")]
    FactSyntax { line: usize, text: String },

    /// Input had the wrong shape for the requested operation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for aspbench-core operations
pub type Result<T> = std::result::Result<T, CoreError>;
