//! Backend availability probing.
//!
//! Probing happens once, when a [`BackendRegistry`] is built. The registry is
//! then passed to whoever runs solvers; there is no process-wide state.

use std::fs;
use std::path::Path;
use std::time::Duration;

use aspbench_config::{AlphaConfig, BenchConfig, ClingoConfig, DusaConfig};

use crate::backend::{AlphaBackend, BackendDescriptor, BackendKind, ClingoBackend, DusaBackend, SolverBackend};
use crate::process::{ProcessExit, ProcessRunner, ProcessSpec};

const PROBE_TIMEOUT: Duration = Duration::from_secs(20);
const CLINGO_BANNER: &str = "clingo version ";

/// The probed set of backends.
#[derive(Debug)]
pub struct BackendRegistry {
    backends: Vec<Box<dyn SolverBackend>>,
}

impl BackendRegistry {
    pub fn new(backends: Vec<Box<dyn SolverBackend>>) -> Self {
        Self { backends }
    }

    /// Probes every configured backend by running its version command.
    ///
    /// A backend that cannot be found is recorded as unavailable, never an
    /// error.
    pub fn probe(config: &BenchConfig) -> Self {
        let runner = ProcessRunner::new(PROBE_TIMEOUT).with_max_output_bytes(64 * 1024);
        let backends = &config.backends;
        let scratch = config.scratch_dir();

        let dusa: Box<dyn SolverBackend> = match probe_dusa(&backends.dusa, &runner) {
            Some(version) => Box::new(DusaBackend::new(backends.dusa.command.clone(), Some(version))),
            None => Box::new(DusaBackend::unavailable(backends.dusa.command.clone())),
        };
        let clingo: Box<dyn SolverBackend> = match probe_clingo(&backends.clingo, &runner) {
            Some(version) => Box::new(ClingoBackend::new(
                backends.clingo.command.clone(),
                Some(version),
                scratch,
            )),
            None => Box::new(ClingoBackend::unavailable(backends.clingo.command.clone(), scratch)),
        };
        let alpha: Box<dyn SolverBackend> = if probe_alpha(&backends.alpha, &runner) {
            Box::new(AlphaBackend::new(backends.alpha.command.clone()))
        } else {
            Box::new(AlphaBackend::unavailable(backends.alpha.command.clone()))
        };

        Self::new(vec![dusa, clingo, alpha])
    }

    /// The backend of `kind`, if it is available.
    pub fn get(&self, kind: BackendKind) -> Option<&dyn SolverBackend> {
        self.backends
            .iter()
            .find(|b| b.kind() == kind && b.descriptor().available)
            .map(|b| b.as_ref())
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &BackendDescriptor> {
        self.backends.iter().map(|b| b.descriptor())
    }

    pub fn is_available(&self, kind: BackendKind) -> bool {
        self.get(kind).is_some()
    }
}

/// Runs `command` and returns its stdout if it exited with status 0.
fn run_version_command(runner: &ProcessRunner, command: &[String]) -> Option<String> {
    let output = runner.run(&ProcessSpec::from_command(command)?);
    match output.exit {
        ProcessExit::Exited(Some(0)) => Some(output.stdout),
        _ => None,
    }
}

fn probe_dusa(config: &DusaConfig, runner: &ProcessRunner) -> Option<String> {
    let kind = BackendKind::StreamEvaluator;
    let Some(version) = package_version(&config.package_lock, "dusa") else {
        tracing::info!(event = "probe", backend = kind.name(), available = false, reason = "no dusa entry in package lock");
        return None;
    };
    if run_version_command(runner, &config.version_command).is_none() {
        tracing::info!(event = "probe", backend = kind.name(), available = false, reason = "node not found");
        return None;
    }
    tracing::info!(event = "probe", backend = kind.name(), available = true, version = version.as_str());
    Some(version)
}

/// Reads `packages["node_modules/<name>"].version` from an npm lock file.
pub fn package_version(lock_file: &Path, name: &str) -> Option<String> {
    let contents = fs::read_to_string(lock_file).ok()?;
    let lock: serde_json::Value = serde_json::from_str(&contents).ok()?;
    lock.get("packages")?
        .get(format!("node_modules/{name}"))?
        .get("version")?
        .as_str()
        .map(str::to_string)
}

fn probe_clingo(config: &ClingoConfig, runner: &ProcessRunner) -> Option<String> {
    let kind = BackendKind::GroundingSolver;
    let mut command = config.command.clone();
    command.push("-v".to_string());
    let version = run_version_command(runner, &command).and_then(|stdout| clingo_version(&stdout));
    match &version {
        Some(version) => {
            tracing::info!(event = "probe", backend = kind.name(), available = true, version = version.as_str())
        }
        None => tracing::info!(event = "probe", backend = kind.name(), available = false, reason = "clingo not found"),
    }
    version
}

/// Extracts the version from the first line of `clingo -v`.
pub fn clingo_version(stdout: &str) -> Option<String> {
    let rest = stdout.strip_prefix(CLINGO_BANNER)?;
    let version = rest.lines().next().unwrap_or_default().trim();
    (!version.is_empty()).then(|| version.to_string())
}

fn probe_alpha(config: &AlphaConfig, runner: &ProcessRunner) -> bool {
    let kind = BackendKind::JvmSolver;
    let Some(java) = config.command.first() else {
        return false;
    };
    let Some(stdout) = run_version_command(runner, &[java.clone(), "--version".to_string()]) else {
        tracing::info!(event = "probe", backend = kind.name(), available = false, reason = "java not found");
        return false;
    };
    if !config.jar.is_file() {
        tracing::info!(
            event = "probe",
            backend = kind.name(),
            available = false,
            reason = "alpha.jar not found",
            jar = %config.jar.display()
        );
        return false;
    }
    let runtime = stdout.lines().next().unwrap_or_default();
    tracing::info!(event = "probe", backend = kind.name(), available = true, runtime);
    true
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
