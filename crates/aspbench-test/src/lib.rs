//! Shared test fixtures for aspbench crates.
//!
//! This crate only depends on `tempfile`, so every other crate can use it as
//! a dev-dependency without creating a cycle.
//!
//! - [`solver`] - fake solver executables built from `/bin/sh` scripts
//! - [`data`] - canned solver output and suite input files
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! aspbench-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use aspbench_test::{FakeSolver, data::CLINGO_TWO_MODELS};
//!
//! let solver = FakeSolver::printing(CLINGO_TWO_MODELS).unwrap();
//! let command = solver.command();
//! ```

pub mod data;
pub mod solver;

pub use solver::FakeSolver;
