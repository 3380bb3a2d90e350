//! Solver adapters for aspbench.
//!
//! Each reasoning engine is an external program with its own command line
//! and output grammar. This crate hides both behind [`SolverBackend`]:
//!
//! - [`process`]: one child process at a time, killed past its budget
//! - [`parser`]: marker-keyed extraction of solution counts
//! - [`backend`]: the three engines and the normalized [`RunOutcome`]
//! - [`probe`]: availability probing into a [`BackendRegistry`]
//!
//! # Example
//!
//! ```no_run
//! use aspbench_config::BenchConfig;
//! use aspbench_runner::{BackendKind, BackendRegistry, Measure, ProcessRunner, Relation, RunRequest};
//!
//! let config = BenchConfig::default();
//! let registry = BackendRegistry::probe(&config);
//! let runner = ProcessRunner::from_config(&config);
//!
//! if let Some(clingo) = registry.get(BackendKind::GroundingSolver) {
//!     let request = RunRequest {
//!         program: "test-programs/spanning-tree-pure-asp.lp".into(),
//!         facts: "/tmp/graph-sparse-linear-32.lp".into(),
//!         relation: Relation::new("inTree", 1),
//!         solutions: 1,
//!         timeout: config.timeout(),
//!         seed: 0xcafe,
//!         measure: Measure::Cardinality,
//!     };
//!     let outcome = clingo.run(&runner, &request).unwrap();
//!     println!("{} solutions in {:?}", outcome.solutions, outcome.elapsed);
//! }
//! ```

pub mod backend;
pub mod error;
pub mod parser;
pub mod probe;
pub mod process;

pub use backend::{
    AlphaBackend, BackendDescriptor, BackendKind, ClingoBackend, DusaBackend, RunOutcome,
    RunRequest, RunStatus, SolverBackend,
};
pub use error::{Result, RunnerError};
pub use parser::{Measure, ParsedOutput, Relation};
pub use probe::BackendRegistry;
pub use process::{ProcessExit, ProcessOutput, ProcessRunner, ProcessSpec};
