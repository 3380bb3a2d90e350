use aspbench_core::{Fact, InstanceKey, ProblemInstance};
use aspbench_runner::{BackendKind, Measure, Relation};

use super::Suite;
use crate::trial::{rep_seed, Cell, Dialect, Trial};

use BackendKind::{GroundingSolver as Clingo, JvmSolver as Alpha, StreamEvaluator as Dusa};

/// A suite whose instances are a handful of facts derived from one size
/// parameter.
#[derive(Debug, Clone)]
pub struct ScalarSuite {
    name: &'static str,
    sizes: Vec<u64>,
    facts: fn(u64) -> Vec<Fact>,
    trials: Vec<Trial>,
}

impl ScalarSuite {
    pub fn new(name: &'static str, sizes: Vec<u64>, facts: fn(u64) -> Vec<Fact>, trials: Vec<Trial>) -> Self {
        Self {
            name,
            sizes,
            facts,
            trials,
        }
    }

    /// N-queens on an `size x size` board, ten solutions per run.
    pub fn queens() -> Self {
        const SOLUTIONS: u32 = 10;
        let trial = |dialect, backend, program, relation| {
            Trial::new("n-queens", dialect, backend, program, relation).with_solutions(SOLUTIONS)
        };
        Self::new(
            "queens",
            vec![1, 4, 5, 6, 8, 10, 12, 14, 16, 20, 24, 28, 32, 40, 48, 56, 64, 80, 96],
            |size| vec![Fact::scalar("size", size as i64)],
            vec![
                trial(Dialect::PureAsp, Clingo, "n-queens-0", Relation::new("numqueens", 1))
                    .with_measure(Measure::ArgumentSum)
                    .with_variant("clingo-0"),
                trial(Dialect::Fclp, Dusa, "n-queens-1", Relation::new("location", 2)).with_variant("dusa-1"),
                trial(Dialect::Fclp, Dusa, "n-queens-2", Relation::new("col", 2)).with_variant("dusa-2"),
                trial(Dialect::Fclp, Dusa, "n-queens-3", Relation::new("rowFor", 2)).with_variant("dusa-3"),
                trial(Dialect::ClingoAsp, Clingo, "n-queens-4", Relation::new("numqueens", 1))
                    .with_measure(Measure::ArgumentSum)
                    .with_variant("clingo-4"),
            ],
        )
    }

    /// A program whose ground size explodes with `dom(size)`, asking for one
    /// and for ten solutions.
    pub fn ground_explosion() -> Self {
        let mut trials = Vec::new();
        for (backend, dialect) in [(Dusa, Dialect::Fclp), (Clingo, Dialect::PureAsp), (Alpha, Dialect::PureAsp)] {
            for solutions in [1, 10] {
                let relation = match backend {
                    Dusa => Relation::new("p", 1),
                    _ => Relation::new("numselected", 1),
                };
                let measure = match backend {
                    Dusa => Measure::Cardinality,
                    _ => Measure::ArgumentSum,
                };
                trials.push(
                    Trial::new("groundexplosion", dialect, backend, "groundexplosion", relation)
                        .with_solutions(solutions)
                        .with_measure(measure)
                        .with_variant(format!("return-{solutions}")),
                );
            }
        }
        Self::new(
            "groundexplosion",
            vec![1, 2, 3, 4, 6, 8, 12, 16, 17, 18, 19, 20, 24, 32, 48, 64, 96, 128, 192, 256, 384, 512, 768, 1000],
            |size| vec![Fact::relation("dom", [size as i64])],
            trials,
        )
    }

    /// Map generation on a `size` by `2 * size + 1` grid, five maps per run.
    pub fn map_generation() -> Self {
        const MAPS: u32 = 5;
        let trials = [(Clingo, Dialect::PureAsp), (Alpha, Dialect::PureAsp), (Dusa, Dialect::Fclp)]
            .into_iter()
            .map(|(backend, dialect)| {
                Trial::new("map-generation", dialect, backend, "map-generation", Relation::new("reachable_edge", 2))
                    .with_solutions(MAPS)
                    .with_variant("mapgen")
            })
            .collect();
        Self::new(
            "mapgen",
            vec![5, 6, 7, 8, 10, 13, 18, 26, 39, 60, 70, 80, 90],
            |size| {
                vec![
                    Fact::scalar("width", size as i64),
                    Fact::scalar("length", 2 * size as i64 + 1),
                ]
            },
            trials,
        )
    }

    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }
}

impl Suite for ScalarSuite {
    fn name(&self) -> &str {
        self.name
    }

    fn cells(&self, repetitions: u32) -> Vec<Cell> {
        let mut cells = Vec::new();
        for (index, &size) in self.sizes.iter().enumerate() {
            for rep in 1..=repetitions {
                cells.push(Cell {
                    key: InstanceKey::new(format!("{}-{size}", self.name)),
                    variant: self.name.to_string(),
                    size,
                    rep,
                    seed: rep_seed(rep as u64),
                    index,
                });
            }
        }
        cells
    }

    fn trials(&self, _cell: &Cell) -> Vec<Trial> {
        self.trials.clone()
    }

    fn instance(&mut self, cell: &Cell) -> aspbench_core::Result<ProblemInstance> {
        Ok(ProblemInstance::from_facts(self.name, cell.size, (self.facts)(cell.size)))
    }
}
