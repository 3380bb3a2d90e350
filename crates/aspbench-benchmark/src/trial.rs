//! Cells and trials: what a sweep runs.

use std::fmt;

use aspbench_core::InstanceKey;
use aspbench_runner::{BackendKind, Measure, Relation};

/// Program dialect a trial's encoding is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Finite-choice logic programming, only the stream evaluator reads it.
    Fclp,
    /// Plain answer-set programming every backend understands.
    PureAsp,
    /// Answer-set programming using grounding-solver extensions.
    ClingoAsp,
}

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Fclp => "fclp",
            Dialect::PureAsp => "pure-asp",
            Dialect::ClingoAsp => "clingo-asp",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (instance, repetition) point of a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Cache name of the instance.
    pub key: InstanceKey,
    /// Default `Problem variant` column, e.g. the graph family.
    pub variant: String,
    pub size: u64,
    pub rep: u32,
    /// Search seed handed to backends with randomized search.
    pub seed: u64,
    /// Suite-private index of the instance description.
    pub index: usize,
}

/// Seed of repetition `rep`.
pub fn rep_seed(rep: u64) -> u64 {
    0xcafe + 0xbeef * rep
}

/// One solver invocation against a cell's instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    pub problem: &'static str,
    pub dialect: Dialect,
    pub backend: BackendKind,
    /// Program file stem under the programs directory.
    pub program: &'static str,
    pub relation: Relation,
    pub solutions: u32,
    pub measure: Measure,
    /// Overrides the cell's variant column.
    pub variant: Option<String>,
}

impl Trial {
    pub fn new(
        problem: &'static str,
        dialect: Dialect,
        backend: BackendKind,
        program: &'static str,
        relation: Relation,
    ) -> Self {
        Self {
            problem,
            dialect,
            backend,
            program,
            relation,
            solutions: 1,
            measure: Measure::Cardinality,
            variant: None,
        }
    }

    pub fn with_solutions(mut self, solutions: u32) -> Self {
        self.solutions = solutions;
        self
    }

    pub fn with_measure(mut self, measure: Measure) -> Self {
        self.measure = measure;
        self
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Program file name, e.g. `spanning-tree.dusa`.
    pub fn program_file(&self) -> String {
        format!("{}.{}", self.program, self.backend.program_extension())
    }
}
