//! Benchmark result types.

use std::time::Duration;

use aspbench_runner::RunStatus;

/// Column header shared by every result file.
pub const HEADER: &str = "Problem,Dialect,System,Problem variant,Problem size,Rep,Time,Solutions,Output";

/// One row of a result file: a single solver run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub problem: String,
    pub dialect: String,
    /// Backend name and version, e.g. `clingo-5.7.1`.
    pub system: String,
    pub variant: String,
    pub size: u64,
    pub rep: u32,
    pub status: RunStatus,
    /// Wall-clock time. Exactly the budget for timed-out runs.
    pub time: Duration,
    /// Solutions found, `-1` for a failed run and `-2` for a timeout.
    pub solutions: i64,
    /// Aggregate of the counted relation over all solutions.
    pub output: i64,
}

impl RunResult {
    /// Returns the run time in milliseconds, at microsecond resolution.
    ///
    /// # Example
    ///
    /// ```
    /// use aspbench_benchmark::RunResult;
    /// use aspbench_runner::RunStatus;
    /// use std::time::Duration;
    ///
    /// let row = RunResult {
    ///     problem: "n-queens".into(),
    ///     dialect: "fclp".into(),
    ///     system: "dusa-0.1.6".into(),
    ///     variant: "dusa-1".into(),
    ///     size: 8,
    ///     rep: 1,
    ///     status: RunStatus::Completed,
    ///     time: Duration::from_micros(12_345),
    ///     solutions: 10,
    ///     output: 80,
    /// };
    /// assert_eq!(row.time_millis(), 12.345);
    /// assert_eq!(row.to_csv_row(), "n-queens,fclp,dusa-0.1.6,dusa-1,8,1,12.345,10,80");
    /// ```
    pub fn time_millis(&self) -> f64 {
        self.time.as_micros() as f64 / 1000.0
    }

    /// Formats the row without a trailing newline.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{}",
            self.problem,
            self.dialect,
            self.system,
            self.variant,
            self.size,
            self.rep,
            self.time_millis(),
            self.solutions,
            self.output,
        )
    }

    pub fn is_timeout(&self) -> bool {
        self.status == RunStatus::Timeout
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self.status, RunStatus::Completed | RunStatus::Timeout)
    }
}

/// Everything one suite sweep produced.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkResult {
    /// Suite name.
    pub suite: String,
    /// Rows in emission order.
    pub runs: Vec<RunResult>,
    /// Trials not run because their backend is unavailable.
    pub skipped_trials: usize,
    /// Instances that could not be generated.
    pub failed_instances: usize,
}

impl BenchmarkResult {
    pub fn new(suite: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            ..Self::default()
        }
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    pub fn timeout_count(&self) -> usize {
        self.runs.iter().filter(|r| r.is_timeout()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.runs.iter().filter(|r| r.is_failure()).count()
    }

    /// Total time spent in solver runs.
    pub fn total_time(&self) -> Duration {
        self.runs.iter().map(|r| r.time).sum()
    }
}
