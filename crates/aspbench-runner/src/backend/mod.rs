//! The uniform solver contract and its three implementations.

mod alpha;
mod clingo;
mod dusa;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::parser::{Measure, ParsedOutput, Relation};
use crate::process::{ProcessExit, ProcessOutput, ProcessRunner, ProcessSpec};

pub use alpha::AlphaBackend;
pub use clingo::ClingoBackend;
pub use dusa::DusaBackend;

/// The three kinds of reasoning engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BackendKind {
    /// Forward-chaining logic-programming evaluator (Dusa).
    StreamEvaluator,
    /// Grounding answer-set solver (clingo).
    GroundingSolver,
    /// JVM-hosted answer-set solver (Alpha).
    JvmSolver,
}

impl BackendKind {
    pub const ALL: [BackendKind; 3] = [
        BackendKind::StreamEvaluator,
        BackendKind::GroundingSolver,
        BackendKind::JvmSolver,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BackendKind::StreamEvaluator => "dusa",
            BackendKind::GroundingSolver => "clingo",
            BackendKind::JvmSolver => "alpha",
        }
    }

    /// File extension of the program encodings this backend reads.
    pub fn program_extension(self) -> &'static str {
        match self {
            BackendKind::StreamEvaluator => "dusa",
            BackendKind::GroundingSolver | BackendKind::JvmSolver => "lp",
        }
    }

    /// Whether the backend reads the structured (JSON) fact encoding
    /// rather than fact text.
    pub fn reads_structured_facts(self) -> bool {
        matches!(self, BackendKind::StreamEvaluator)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A backend as found by probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendDescriptor {
    pub kind: BackendKind,
    pub available: bool,
    pub version: Option<String>,
}

impl BackendDescriptor {
    pub fn available(kind: BackendKind, version: Option<String>) -> Self {
        Self {
            kind,
            available: true,
            version,
        }
    }

    pub fn unavailable(kind: BackendKind) -> Self {
        Self {
            kind,
            available: false,
            version: None,
        }
    }

    /// The system label written to result rows, e.g. `clingo-5.7.1`.
    pub fn system(&self) -> String {
        match &self.version {
            Some(version) => format!("{}-{version}", self.kind.name()),
            None => self.kind.name().to_string(),
        }
    }
}

/// One solver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Program encoding, opaque to the runner.
    pub program: PathBuf,
    /// Fact file in the encoding the backend reads.
    pub facts: PathBuf,
    pub relation: Relation,
    /// Number of solutions to ask for.
    pub solutions: u32,
    pub timeout: Duration,
    /// Search seed, ignored by backends without randomized search.
    pub seed: u64,
    pub measure: Measure,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    /// Output lacked the success marker.
    ParseFailure,
    LaunchFailure,
    /// The solver exited with a code it does not use for success.
    ErrorExit,
    Timeout,
}

impl RunStatus {
    /// The value recorded in the `Solutions` column for a failed run.
    pub fn sentinel(self) -> Option<i64> {
        match self {
            RunStatus::Completed => None,
            RunStatus::ParseFailure | RunStatus::LaunchFailure | RunStatus::ErrorExit => Some(-1),
            RunStatus::Timeout => Some(-2),
        }
    }
}

/// The normalized result of one solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub elapsed: Duration,
    /// Solutions found, or the failure sentinel.
    pub solutions: i64,
    pub output: i64,
}

impl RunOutcome {
    pub fn completed(parsed: ParsedOutput, elapsed: Duration) -> Self {
        Self {
            status: RunStatus::Completed,
            elapsed,
            solutions: parsed.solutions,
            output: parsed.aggregate,
        }
    }

    /// A timed-out run always reports exactly the nominal budget.
    pub fn timeout(budget: Duration) -> Self {
        Self {
            status: RunStatus::Timeout,
            elapsed: budget,
            solutions: -2,
            output: 0,
        }
    }

    pub fn failed(status: RunStatus, elapsed: Duration) -> Self {
        Self {
            status,
            elapsed,
            solutions: status.sentinel().unwrap_or(-1),
            output: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Completed
    }
}

/// A reasoning engine driven as an external process.
pub trait SolverBackend: Send + Sync + fmt::Debug {
    fn descriptor(&self) -> &BackendDescriptor;

    /// Builds the command line for `request`.
    ///
    /// May write auxiliary input files; failing to do so is a setup error.
    fn command(&self, request: &RunRequest) -> Result<ProcessSpec>;

    /// Extracts counts from the output of a run that exited normally.
    fn parse(&self, stdout: &str, request: &RunRequest) -> Option<ParsedOutput>;

    /// Whether `code` is an exit code of a successful run.
    fn accepts_exit(&self, code: i32) -> bool {
        code == 0
    }

    fn kind(&self) -> BackendKind {
        self.descriptor().kind
    }

    /// Spawns the solver and waits for it under the request's budget.
    fn invoke(&self, runner: &ProcessRunner, request: &RunRequest) -> Result<ProcessOutput> {
        let spec = self.command(request)?;
        tracing::debug!(
            event = "run_start",
            backend = self.kind().name(),
            command = spec.command_line().as_str()
        );
        Ok(runner.clone().with_timeout(request.timeout).run(&spec))
    }

    /// Maps a finished process onto a [`RunOutcome`].
    fn outcome(&self, output: &ProcessOutput, request: &RunRequest) -> RunOutcome {
        if output.elapsed > request.timeout || output.exit == ProcessExit::Killed {
            return RunOutcome::timeout(request.timeout);
        }
        match output.exit {
            ProcessExit::LaunchFailed(_) => RunOutcome::failed(RunStatus::LaunchFailure, output.elapsed),
            ProcessExit::Exited(Some(code)) if self.accepts_exit(code) => {
                match self.parse(&output.stdout, request) {
                    Some(parsed) => RunOutcome::completed(parsed, output.elapsed),
                    None => RunOutcome::failed(RunStatus::ParseFailure, output.elapsed),
                }
            }
            _ => RunOutcome::failed(RunStatus::ErrorExit, output.elapsed),
        }
    }

    /// Runs `request` end to end.
    ///
    /// Every per-run failure is folded into the outcome; only setup errors
    /// from [`command`](Self::command) escape.
    fn run(&self, runner: &ProcessRunner, request: &RunRequest) -> Result<RunOutcome> {
        let output = self.invoke(runner, request)?;
        let outcome = self.outcome(&output, request);
        if let ProcessExit::LaunchFailed(reason) = &output.exit {
            tracing::warn!(event = "launch_failed", backend = self.kind().name(), reason = reason.as_str());
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests;
