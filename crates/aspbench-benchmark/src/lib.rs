//! Benchmark sweeps for answer-set and finite-choice logic solvers.
//!
//! A [`Suite`] lists the cells of a sweep (instance and repetition) and the
//! trials to run against each. [`Benchmark`] walks those cells in order,
//! caches every instance on first use, runs each trial through its solver
//! backend and streams one CSV row per run. Result shards are later merged
//! with [`gather`].
//!
//! # Example
//!
//! ```
//! use aspbench_benchmark::{Suite, SuiteKind};
//! use aspbench_config::BenchConfig;
//!
//! let suite = SuiteKind::Queens.load(&BenchConfig::default()).unwrap();
//! let cells = suite.cells(3);
//!
//! assert_eq!(suite.shard_name(), "queens-tests.csv");
//! assert_eq!(cells[0].key.as_str(), "queens-1");
//! assert_eq!(suite.trials(&cells[0]).len(), 5);
//! ```

pub mod aggregate;
mod error;
pub mod import;
mod report;
mod result;
mod runner;
pub mod suites;
mod trial;

pub use aggregate::{discover_shards, gather, gather_today, merge};
pub use error::{BenchmarkError, Result};
pub use import::import_graph5col;
pub use report::CsvReport;
pub use result::{BenchmarkResult, RunResult, HEADER};
pub use runner::Benchmark;
pub use suites::{DataSuite, DataSuiteKind, Graph5ColClass, GraphSuite, ScalarSuite, Suite, SuiteKind};
pub use trial::{rep_seed, Cell, Dialect, Trial};
