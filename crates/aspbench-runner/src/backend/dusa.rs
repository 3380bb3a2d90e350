use super::{BackendDescriptor, BackendKind, RunRequest, SolverBackend};
use crate::error::{Result, RunnerError};
use crate::parser::{parse_dusa, ParsedOutput};
use crate::process::ProcessSpec;

/// The stream evaluator, launched through its runner script.
///
/// Invoked as `<command> <program> <facts.json> <relation> <solutions>`. The
/// script prints one `(n)` line per solution and `DONE` when finished.
#[derive(Debug, Clone)]
pub struct DusaBackend {
    descriptor: BackendDescriptor,
    command: Vec<String>,
}

impl DusaBackend {
    pub fn new(command: Vec<String>, version: Option<String>) -> Self {
        Self {
            descriptor: BackendDescriptor::available(BackendKind::StreamEvaluator, version),
            command,
        }
    }

    pub fn unavailable(command: Vec<String>) -> Self {
        Self {
            descriptor: BackendDescriptor::unavailable(BackendKind::StreamEvaluator),
            command,
        }
    }
}

impl SolverBackend for DusaBackend {
    fn descriptor(&self) -> &BackendDescriptor {
        &self.descriptor
    }

    fn command(&self, request: &RunRequest) -> Result<ProcessSpec> {
        let spec = ProcessSpec::from_command(&self.command).ok_or(RunnerError::EmptyCommand)?;
        Ok(spec
            .arg(&request.program)
            .arg(&request.facts)
            .arg(&request.relation.name)
            .arg(request.solutions.to_string()))
    }

    fn parse(&self, stdout: &str, _request: &RunRequest) -> Option<ParsedOutput> {
        parse_dusa(stdout)
    }
}
