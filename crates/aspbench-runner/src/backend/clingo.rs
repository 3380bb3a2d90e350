use std::path::{Path, PathBuf};

use aspbench_core::write_once;

use super::{BackendDescriptor, BackendKind, RunRequest, SolverBackend};
use crate::error::{Result, RunnerError};
use crate::parser::{parse_clingo, ParsedOutput, Relation};
use crate::process::ProcessSpec;

/// The grounding solver.
///
/// Output is restricted to the counted relation by a `#show` directive file
/// generated next to the cached instances.
#[derive(Debug, Clone)]
pub struct ClingoBackend {
    descriptor: BackendDescriptor,
    command: Vec<String>,
    scratch_dir: PathBuf,
}

impl ClingoBackend {
    pub fn new(command: Vec<String>, version: Option<String>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            descriptor: BackendDescriptor::available(BackendKind::GroundingSolver, version),
            command,
            scratch_dir: scratch_dir.into(),
        }
    }

    pub fn unavailable(command: Vec<String>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            descriptor: BackendDescriptor::unavailable(BackendKind::GroundingSolver),
            command,
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Path of the show directive for `relation`, written on first use.
    pub fn show_file(&self, relation: &Relation) -> Result<PathBuf> {
        write_show_file(&self.scratch_dir, relation)
    }
}

fn write_show_file(dir: &Path, relation: &Relation) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|source| RunnerError::ScratchDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(format!("show-{}-{}.lp", relation.name, relation.arity));
    write_once(&path, format!("#show {relation}.\n").as_bytes()).map_err(|source| {
        RunnerError::ShowFile {
            path: path.clone(),
            source,
        }
    })?;
    Ok(path)
}

impl SolverBackend for ClingoBackend {
    fn descriptor(&self) -> &BackendDescriptor {
        &self.descriptor
    }

    fn command(&self, request: &RunRequest) -> Result<ProcessSpec> {
        let show = self.show_file(&request.relation)?;
        let spec = ProcessSpec::from_command(&self.command).ok_or(RunnerError::EmptyCommand)?;
        Ok(spec
            .arg(format!("-n{}", request.solutions))
            .arg("-V0")
            .arg("--rand-freq=1")
            .arg(format!("--seed={}", request.seed))
            .arg(&request.program)
            .arg(&request.facts)
            .arg(show))
    }

    fn parse(&self, stdout: &str, request: &RunRequest) -> Option<ParsedOutput> {
        parse_clingo(stdout, &request.relation, request.measure)
    }

    /// 10, 20 and 30 report satisfiable, unsatisfiable and exhausted.
    fn accepts_exit(&self, code: i32) -> bool {
        matches!(code, 0 | 10 | 20 | 30)
    }
}
