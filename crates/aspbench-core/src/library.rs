//! Pre-generated graph collections.
//!
//! A library file holds, for every size in a [`SizeRange`], one graph of each
//! structural family:
//!
//! ```text
//! [{ "numEdges": 32, "graphs": { "dense-random": { "edges": [...], "numNodes": 17 }, ... } }]
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::{Graph, GraphGenerator, StructuralFamily};

/// An inclusive range of edge counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeRange {
    pub start: usize,
    pub end: usize,
    pub step: usize,
}

impl SizeRange {
    /// The three ranges the graph benchmarks are run over.
    pub const STANDARD: [SizeRange; 3] = [
        SizeRange::new(32, 32 * 7, 32),
        SizeRange::new(256, 256 * 7, 256),
        SizeRange::new(2048, 2048 * 7, 2048),
    ];

    pub const fn new(start: usize, end: usize, step: usize) -> Self {
        Self { start, end, step }
    }

    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        (self.start..=self.end).step_by(self.step.max(1))
    }

    /// File name of the library covering this range.
    ///
    /// # Example
    ///
    /// ```
    /// use aspbench_core::SizeRange;
    ///
    /// assert_eq!(
    ///     SizeRange::STANDARD[0].file_name(),
    ///     "test-graphs-32-to-224-edges-step-32.json"
    /// );
    /// ```
    pub fn file_name(&self) -> String {
        format!(
            "test-graphs-{}-to-{}-edges-step-{}.json",
            self.start, self.end, self.step
        )
    }
}

/// One graph per family, all with the same edge count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSet {
    #[serde(rename = "numEdges")]
    pub num_edges: usize,
    pub graphs: BTreeMap<StructuralFamily, Graph>,
}

/// An ordered collection of graph sets, unique by edge count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphLibrary {
    sets: Vec<GraphSet>,
}

impl GraphLibrary {
    /// Generates one graph of every family in `families` for each size.
    pub fn generate<R: Rng>(
        range: SizeRange,
        families: &[StructuralFamily],
        generator: &mut GraphGenerator<R>,
    ) -> Result<Self> {
        let mut sets = Vec::new();
        for num_edges in range.sizes() {
            let mut graphs = BTreeMap::new();
            for &family in families {
                graphs.insert(family, generator.generate(family, num_edges)?);
                tracing::info!(event = "graph_generated", family = family.as_str(), edges = num_edges as u64);
            }
            sets.push(GraphSet { num_edges, graphs });
        }
        Ok(Self { sets })
    }

    /// Loads library files in order, keeping the first set for each edge count.
    pub fn load_many<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut library = Self::default();
        for path in paths {
            let sets: Vec<GraphSet> = serde_json::from_str(&fs::read_to_string(path)?)?;
            library.extend(sets)?;
        }
        Ok(library)
    }

    /// Appends sets whose edge count is not already present.
    pub fn extend(&mut self, sets: impl IntoIterator<Item = GraphSet>) -> Result<()> {
        let mut seen: HashSet<usize> = self.sets.iter().map(|s| s.num_edges).collect();
        for set in sets {
            for graph in set.graphs.values() {
                graph.validate()?;
            }
            if seen.insert(set.num_edges) {
                self.sets.push(set);
            }
        }
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, serde_json::to_string(&self.sets)?)?;
        Ok(())
    }

    pub fn sets(&self) -> &[GraphSet] {
        &self.sets
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Edge counts in library order.
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.sets.iter().map(|s| s.num_edges)
    }

    pub fn get(&self, family: StructuralFamily, num_edges: usize) -> Option<&Graph> {
        self.sets
            .iter()
            .find(|s| s.num_edges == num_edges)
            .and_then(|s| s.graphs.get(&family))
    }
}

#[cfg(test)]
#[path = "library_tests.rs"]
mod tests;
