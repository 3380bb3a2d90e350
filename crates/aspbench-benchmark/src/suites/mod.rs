//! Problem suites.
//!
//! A suite lists its cells in sweep order, says which trials run against each
//! cell, and builds a cell's instance when it is not cached yet.

mod data;
mod graph;
mod scalar;

use std::fmt;
use std::str::FromStr;

use aspbench_config::BenchConfig;
use aspbench_core::ProblemInstance;

use crate::error::{BenchmarkError, Result};
use crate::trial::{Cell, Trial};

pub use data::{DataSuite, DataSuiteKind, Graph5ColClass};
pub use graph::GraphSuite;
pub use scalar::ScalarSuite;

/// A family of benchmark problems.
pub trait Suite {
    fn name(&self) -> &str;

    /// Cells in sweep order.
    fn cells(&self, repetitions: u32) -> Vec<Cell>;

    /// Trials run against `cell`, in emission order.
    fn trials(&self, cell: &Cell) -> Vec<Trial>;

    /// Builds the instance of `cell`. Only called on a cache miss.
    fn instance(&mut self, cell: &Cell) -> aspbench_core::Result<ProblemInstance>;

    /// File name of the suite's result shard.
    fn shard_name(&self) -> String {
        format!("{}-tests.csv", self.name())
    }
}

/// The suites `aspbench run` knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteKind {
    Graph,
    Queens,
    GroundExplosion,
    MapGeneration,
    Reachability,
    CutEdge,
    Graph5Col,
}

impl SuiteKind {
    pub const ALL: [SuiteKind; 7] = [
        SuiteKind::Graph,
        SuiteKind::Queens,
        SuiteKind::GroundExplosion,
        SuiteKind::MapGeneration,
        SuiteKind::Reachability,
        SuiteKind::CutEdge,
        SuiteKind::Graph5Col,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SuiteKind::Graph => "graph",
            SuiteKind::Queens => "queens",
            SuiteKind::GroundExplosion => "groundexplosion",
            SuiteKind::MapGeneration => "mapgen",
            SuiteKind::Reachability => "reachability",
            SuiteKind::CutEdge => "cutedge",
            SuiteKind::Graph5Col => "graph5col",
        }
    }

    /// Loads the suite's input data as configured.
    pub fn load(self, config: &BenchConfig) -> Result<Box<dyn Suite>> {
        Ok(match self {
            SuiteKind::Graph => Box::new(GraphSuite::load(config)?),
            SuiteKind::Queens => Box::new(ScalarSuite::queens()),
            SuiteKind::GroundExplosion => Box::new(ScalarSuite::ground_explosion()),
            SuiteKind::MapGeneration => Box::new(ScalarSuite::map_generation()),
            SuiteKind::Reachability => Box::new(DataSuite::load(DataSuiteKind::Reachability, &config.data_dir)?),
            SuiteKind::CutEdge => Box::new(DataSuite::load(DataSuiteKind::CutEdge, &config.data_dir)?),
            SuiteKind::Graph5Col => Box::new(DataSuite::load(DataSuiteKind::Graph5Col, &config.data_dir)?),
        })
    }
}

impl fmt::Display for SuiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuiteKind {
    type Err = BenchmarkError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SuiteKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| BenchmarkError::UnknownSuite(s.to_string()))
    }
}

#[cfg(test)]
mod tests;
