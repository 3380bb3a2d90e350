//! Error types for the runner.
//!
//! Individual solver runs never fail with these: a crashed, silent or slow
//! solver is reported through [`RunOutcome`](crate::RunOutcome). Only setup
//! work that every later run depends on can fail.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("cannot prepare scratch directory {path}: {source}")]
    ScratchDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write show directive {path}: {source}")]
    ShowFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("backend command is empty")]
    EmptyCommand,
}

pub type Result<T> = std::result::Result<T, RunnerError>;
