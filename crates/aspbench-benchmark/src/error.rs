//! Error types for benchmark sweeps and report merging.

use std::path::PathBuf;

use aspbench_core::CoreError;
use aspbench_runner::RunnerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A shard does not start with the result header.
    #[error("bad header for {}: {found}", path.display())]
    HeaderMismatch { path: PathBuf, found: String },

    /// Suite input data is missing or malformed.
    #[error("cannot read suite data {}: {reason}", path.display())]
    SuiteData { path: PathBuf, reason: String },

    #[error("unknown suite: {0}")]
    UnknownSuite(String),
}

pub type Result<T> = std::result::Result<T, BenchmarkError>;
