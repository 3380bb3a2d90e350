//! Benchmark orchestrator.

use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use aspbench_config::BenchConfig;
use aspbench_core::{CoreError, InstanceFiles, InstanceStore};
use aspbench_runner::{BackendRegistry, ProcessRunner, RunRequest};

use crate::error::Result;
use crate::report::CsvReport;
use crate::result::{BenchmarkResult, RunResult};
use crate::suites::Suite;
use crate::trial::{Cell, Trial};

/// Drives one suite sweep at a time.
///
/// Cells are visited in the suite's order and each cell's trials run one
/// after another, so at most one solver process is alive at any moment.
/// Rows are written to the report as soon as their run ends.
///
/// # Example
///
/// ```no_run
/// use aspbench_benchmark::{Benchmark, CsvReport, SuiteKind};
/// use aspbench_config::BenchConfig;
/// use aspbench_runner::BackendRegistry;
///
/// let config = BenchConfig::default();
/// let registry = BackendRegistry::probe(&config);
/// let benchmark = Benchmark::new(&config, &registry).unwrap();
///
/// let mut suite = SuiteKind::Queens.load(&config).unwrap();
/// let mut report = CsvReport::new(std::io::stdout()).unwrap();
/// let result = benchmark.run(suite.as_mut(), &mut report).unwrap();
/// println!("{} runs", result.run_count());
/// ```
#[derive(Debug)]
pub struct Benchmark<'a> {
    config: &'a BenchConfig,
    registry: &'a BackendRegistry,
    runner: ProcessRunner,
    store: InstanceStore,
}

impl<'a> Benchmark<'a> {
    /// Creates an orchestrator caching instances under the configured
    /// scratch directory.
    pub fn new(config: &'a BenchConfig, registry: &'a BackendRegistry) -> Result<Self> {
        let store = InstanceStore::open(config.scratch_dir().join("instances"))?;
        Ok(Self {
            config,
            registry,
            runner: ProcessRunner::from_config(config),
            store,
        })
    }

    /// Replaces the instance cache.
    pub fn with_store(mut self, store: InstanceStore) -> Self {
        self.store = store;
        self
    }

    pub fn store(&self) -> &InstanceStore {
        &self.store
    }

    /// Sweeps `suite` and writes one row per run to `report`.
    ///
    /// Failed and timed-out runs become rows with sentinel values. A cell
    /// whose instance cannot be generated is skipped. Any other error ends
    /// the sweep.
    pub fn run<W: Write>(&self, suite: &mut dyn Suite, report: &mut CsvReport<W>) -> Result<BenchmarkResult> {
        let mut result = BenchmarkResult::new(suite.name());
        let cells = suite.cells(self.config.repetitions);
        let mut failed: BTreeSet<String> = BTreeSet::new();

        tracing::info!(
            event = "sweep_start",
            suite = suite.name(),
            cells = cells.len() as u64,
            repetitions = self.config.repetitions
        );

        for cell in &cells {
            if failed.contains(cell.key.as_str()) {
                continue;
            }
            let files = match self.store.ensure(&cell.key, || suite.instance(cell)) {
                Ok((files, _)) => files,
                Err(CoreError::Generation(err)) => {
                    tracing::warn!(
                        event = "instance_failed",
                        key = cell.key.as_str(),
                        error = %err
                    );
                    failed.insert(cell.key.as_str().to_string());
                    result.failed_instances += 1;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            for trial in suite.trials(cell) {
                match self.run_trial(&trial, cell, &files)? {
                    Some(row) => {
                        report.write_row(&row)?;
                        result.runs.push(row);
                    }
                    None => result.skipped_trials += 1,
                }
            }
        }

        tracing::info!(
            event = "sweep_end",
            suite = suite.name(),
            runs = result.run_count() as u64,
            timeouts = result.timeout_count() as u64,
            failures = result.failure_count() as u64,
            skipped = result.skipped_trials as u64,
            failed_instances = result.failed_instances as u64
        );
        Ok(result)
    }

    /// Sweeps `suite` into its shard file under `results_dir`, replacing any
    /// previous shard. Returns the shard path along with the result.
    pub fn run_to_dir(&self, suite: &mut dyn Suite, results_dir: &Path) -> Result<(PathBuf, BenchmarkResult)> {
        fs::create_dir_all(results_dir)?;
        let path = results_dir.join(suite.shard_name());
        let mut report = CsvReport::create(&path)?;
        let result = self.run(suite, &mut report)?;
        Ok((path, result))
    }

    /// Runs one trial, or returns `None` when its backend is unavailable.
    fn run_trial(&self, trial: &Trial, cell: &Cell, files: &InstanceFiles) -> Result<Option<RunResult>> {
        let Some(backend) = self.registry.get(trial.backend) else {
            tracing::debug!(
                event = "trial_skipped",
                backend = trial.backend.name(),
                problem = trial.problem
            );
            return Ok(None);
        };

        let facts = if trial.backend.reads_structured_facts() {
            &files.structured
        } else {
            &files.text
        };
        let request = RunRequest {
            program: self.config.programs_dir.join(trial.program_file()),
            facts: facts.clone(),
            relation: trial.relation.clone(),
            solutions: trial.solutions,
            timeout: self.config.timeout(),
            seed: cell.seed,
            measure: trial.measure,
        };
        let outcome = backend.run(&self.runner, &request)?;

        let row = RunResult {
            problem: trial.problem.to_string(),
            dialect: trial.dialect.to_string(),
            system: backend.descriptor().system(),
            variant: trial.variant.clone().unwrap_or_else(|| cell.variant.clone()),
            size: cell.size,
            rep: cell.rep,
            status: outcome.status,
            time: outcome.elapsed,
            solutions: outcome.solutions,
            output: outcome.output,
        };
        tracing::info!(
            event = "run_end",
            problem = row.problem.as_str(),
            system = row.system.as_str(),
            variant = row.variant.as_str(),
            size = row.size,
            rep = row.rep,
            elapsed_ms = row.time_millis(),
            solutions = row.solutions,
            output = row.output
        );
        Ok(Some(row))
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
