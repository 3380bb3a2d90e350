use super::{BackendDescriptor, BackendKind, RunRequest, SolverBackend};
use crate::error::{Result, RunnerError};
use crate::parser::{parse_alpha, ParsedOutput};
use crate::process::ProcessSpec;

/// The JVM answer-set solver.
#[derive(Debug, Clone)]
pub struct AlphaBackend {
    descriptor: BackendDescriptor,
    command: Vec<String>,
}

impl AlphaBackend {
    pub fn new(command: Vec<String>) -> Self {
        Self {
            descriptor: BackendDescriptor::available(BackendKind::JvmSolver, None),
            command,
        }
    }

    pub fn unavailable(command: Vec<String>) -> Self {
        Self {
            descriptor: BackendDescriptor::unavailable(BackendKind::JvmSolver),
            command,
        }
    }
}

impl SolverBackend for AlphaBackend {
    fn descriptor(&self) -> &BackendDescriptor {
        &self.descriptor
    }

    fn command(&self, request: &RunRequest) -> Result<ProcessSpec> {
        let spec = ProcessSpec::from_command(&self.command).ok_or(RunnerError::EmptyCommand)?;
        Ok(spec
            .arg(format!("-n{}", request.solutions))
            .arg("-dni")
            .arg("-i")
            .arg(&request.program)
            .arg("-i")
            .arg(&request.facts)
            .arg(format!("-f{}", request.relation.name))
            .arg(format!("-e{}", request.seed)))
    }

    fn parse(&self, stdout: &str, request: &RunRequest) -> Option<ParsedOutput> {
        parse_alpha(stdout, &request.relation, request.measure)
    }
}
