use aspbench_config::BenchConfig;
use aspbench_core::{
    CoreError, GraphEncoding, GraphGenerator, GraphLibrary, InstanceKey, ProblemInstance,
    SizeRange, StructuralFamily,
};
use aspbench_runner::{BackendKind, Relation};

use super::Suite;
use crate::error::Result;
use crate::trial::{rep_seed, Cell, Dialect, Trial};

#[derive(Debug, Clone)]
enum GraphSource {
    Library(GraphLibrary),
    Generated(GraphGenerator),
}

/// Spanning trees and canonical representatives over generated graphs.
#[derive(Debug, Clone)]
pub struct GraphSuite {
    source: GraphSource,
    entries: Vec<(StructuralFamily, usize)>,
}

impl GraphSuite {
    /// Runs every graph in `library`.
    pub fn from_library(library: GraphLibrary) -> Self {
        let mut entries = Vec::new();
        for family in StructuralFamily::ALL {
            for edges in library.sizes() {
                if library.get(family, edges).is_some() {
                    entries.push((family, edges));
                }
            }
        }
        Self {
            source: GraphSource::Library(library),
            entries,
        }
    }

    /// Generates each graph on first use.
    pub fn generated(families: &[StructuralFamily], sizes: &[usize], generator: GraphGenerator) -> Self {
        let entries = families
            .iter()
            .flat_map(|&family| sizes.iter().map(move |&edges| (family, edges)))
            .collect();
        Self {
            source: GraphSource::Generated(generator),
            entries,
        }
    }

    /// Uses the graph library in the data directory when all of its files
    /// exist, and generates graphs otherwise.
    pub fn load(config: &BenchConfig) -> Result<Self> {
        let paths: Vec<_> = SizeRange::STANDARD
            .iter()
            .map(|range| config.data_dir.join(range.file_name()))
            .collect();

        if paths.iter().all(|path| path.is_file()) {
            let library = GraphLibrary::load_many(&paths)?;
            tracing::info!(event = "graph_library", sets = library.sets().len() as u64);
            return Ok(Self::from_library(library));
        }

        tracing::info!(
            event = "graph_library",
            data_dir = %config.data_dir.display(),
            "library not found, generating graphs on demand"
        );
        let generator = match config.generator_seed {
            Some(seed) => GraphGenerator::seeded(seed),
            None => GraphGenerator::from_os_rng(),
        }
        .with_max_attempts(config.max_generation_attempts);
        let sizes: Vec<usize> = SizeRange::STANDARD.iter().flat_map(SizeRange::sizes).collect();
        Ok(Self::generated(&StructuralFamily::ALL, &sizes, generator))
    }
}

fn graph_trials() -> Vec<Trial> {
    use BackendKind::{GroundingSolver as Clingo, JvmSolver as Alpha, StreamEvaluator as Dusa};
    use Dialect::{ClingoAsp, Fclp, PureAsp};

    vec![
        Trial::new("spanning-tree", Fclp, Dusa, "spanning-tree", Relation::new("parent", 2)),
        Trial::new("spanning-tree", PureAsp, Dusa, "spanning-tree-pure-asp", Relation::new("p", 2)),
        Trial::new("spanning-tree", PureAsp, Alpha, "spanning-tree-pure-asp", Relation::new("inTree", 1)),
        Trial::new("spanning-tree", ClingoAsp, Clingo, "spanning-tree-clingo-asp", Relation::new("inTree", 1)),
        Trial::new("spanning-tree", PureAsp, Clingo, "spanning-tree-pure-asp", Relation::new("inTree", 1)),
        Trial::new("canonical-reps", Fclp, Dusa, "canonical-reps", Relation::new("isRep", 1)),
        Trial::new("canonical-reps", PureAsp, Dusa, "canonical-reps-pure-asp", Relation::new("isRep", 1)),
        Trial::new("canonical-reps", PureAsp, Alpha, "canonical-reps-pure-asp", Relation::new("isRep", 1)),
        Trial::new("canonical-reps", ClingoAsp, Clingo, "canonical-reps-clingo-asp", Relation::new("isRep", 1)),
        Trial::new("canonical-reps", PureAsp, Clingo, "canonical-reps-pure-asp", Relation::new("isRep", 1)),
    ]
}

impl Suite for GraphSuite {
    fn name(&self) -> &str {
        "graph"
    }

    fn cells(&self, repetitions: u32) -> Vec<Cell> {
        let mut cells = Vec::new();
        for (index, &(family, edges)) in self.entries.iter().enumerate() {
            for rep in 1..=repetitions {
                cells.push(Cell {
                    key: InstanceKey::graph(family, edges),
                    variant: family.to_string(),
                    size: edges as u64,
                    rep,
                    seed: rep_seed(rep as u64),
                    index,
                });
            }
        }
        cells
    }

    fn trials(&self, _cell: &Cell) -> Vec<Trial> {
        graph_trials()
    }

    fn instance(&mut self, cell: &Cell) -> aspbench_core::Result<ProblemInstance> {
        let &(family, edges) = self
            .entries
            .get(cell.index)
            .ok_or_else(|| CoreError::InvalidInput(format!("no graph for cell {}", cell.key)))?;

        let graph = match &mut self.source {
            GraphSource::Library(library) => library.get(family, edges).cloned().ok_or_else(|| {
                CoreError::InvalidInput(format!("library has no {family} graph with {edges} edges"))
            })?,
            GraphSource::Generated(generator) => generator.generate(family, edges)?,
        };
        Ok(ProblemInstance::from_graph(family, graph, &GraphEncoding::default()))
    }
}
