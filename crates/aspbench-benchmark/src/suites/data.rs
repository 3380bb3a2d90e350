use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use aspbench_core::{CoreError, Fact, InstanceKey, ProblemInstance};
use aspbench_runner::{BackendKind, Measure, Relation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::Suite;
use crate::error::{BenchmarkError, Result};
use crate::trial::{rep_seed, Cell, Dialect, Trial};

/// Suites read from pre-built instance files in the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSuiteKind {
    Reachability,
    CutEdge,
    Graph5Col,
}

impl DataSuiteKind {
    pub fn name(self) -> &'static str {
        match self {
            DataSuiteKind::Reachability => "reachability",
            DataSuiteKind::CutEdge => "cutedge",
            DataSuiteKind::Graph5Col => "graph5col",
        }
    }

    /// Input file name, e.g. `test-reachability.json`.
    pub fn file_name(self) -> String {
        format!("test-{}.json", self.name())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ReachabilityClass {
    nodes: u64,
    multiplier: f64,
    variants: Vec<StartVariant>,
}

#[derive(Debug, Clone, Deserialize)]
struct StartVariant {
    start: i64,
    links: Vec<(i64, i64)>,
}

#[derive(Debug, Clone, Deserialize)]
struct CutEdgeClass {
    nodes: u64,
    percentage: f64,
    variants: Vec<SpecialVariant>,
}

#[derive(Debug, Clone, Deserialize)]
struct SpecialVariant {
    special: i64,
    links: Vec<(i64, i64)>,
}

/// One `<nodes>/<edges>` class of graph-coloring instances.
///
/// Variant `i` holds the links of instance number `i + 1`; missing instance
/// numbers are `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph5ColClass {
    pub nodes: u64,
    pub edges: u64,
    pub variants: Vec<Option<Vec<(i64, i64)>>>,
}

#[derive(Debug, Clone)]
struct Entry {
    key: InstanceKey,
    variant: String,
    size: u64,
    rep: u32,
    facts: Vec<Fact>,
}

/// A suite with a fixed list of instances, one cell each.
///
/// Cells are ordered by node count. The repetition column holds the
/// variant's index within its class, and seeds come from a running counter
/// over all cells.
#[derive(Debug, Clone)]
pub struct DataSuite {
    kind: DataSuiteKind,
    entries: Vec<Entry>,
}

impl DataSuite {
    /// Reads `test-<name>.json` from `data_dir`.
    pub fn load(kind: DataSuiteKind, data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(kind.file_name());
        let contents = fs::read_to_string(&path).map_err(|err| BenchmarkError::SuiteData {
            path: path.clone(),
            reason: err.to_string(),
        })?;
        Self::from_json(kind, &contents).map_err(|err| match err {
            BenchmarkError::Json(err) => BenchmarkError::SuiteData {
                path,
                reason: err.to_string(),
            },
            other => other,
        })
    }

    pub fn from_json(kind: DataSuiteKind, json: &str) -> Result<Self> {
        let entries = match kind {
            DataSuiteKind::Reachability => reachability_entries(classes(json)?),
            DataSuiteKind::CutEdge => cutedge_entries(classes(json)?),
            DataSuiteKind::Graph5Col => graph5col_entries(classes(json)?),
        };
        Ok(Self { kind, entries })
    }

    pub fn kind(&self) -> DataSuiteKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parses the class map and orders classes by node count.
fn classes<T: DeserializeOwned>(json: &str) -> Result<Vec<T>>
where
    T: HasNodes,
{
    let map: BTreeMap<String, T> = serde_json::from_str(json)?;
    let mut classes: Vec<T> = map.into_values().collect();
    classes.sort_by_key(|class| class.nodes());
    Ok(classes)
}

trait HasNodes {
    fn nodes(&self) -> u64;
}

impl HasNodes for ReachabilityClass {
    fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl HasNodes for CutEdgeClass {
    fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl HasNodes for Graph5ColClass {
    fn nodes(&self) -> u64 {
        self.nodes
    }
}

fn edge_facts<'a>(name: &'a str, links: &'a [(i64, i64)]) -> impl Iterator<Item = Fact> + 'a {
    links.iter().map(move |&(a, b)| Fact::relation(name, [a, b]))
}

fn reachability_entries(classes: Vec<ReachabilityClass>) -> Vec<Entry> {
    let mut entries = Vec::new();
    for class in classes {
        for (rep, variant) in class.variants.iter().enumerate() {
            let mut facts = vec![Fact::relation("start", [variant.start])];
            facts.extend(edge_facts("edge", &variant.links));
            entries.push(Entry {
                key: InstanceKey::new(format!("reachability-{}-{}-{rep}", class.nodes, class.multiplier)),
                variant: class.multiplier.to_string(),
                size: class.nodes,
                rep: rep as u32,
                facts,
            });
        }
    }
    entries
}

fn cutedge_entries(classes: Vec<CutEdgeClass>) -> Vec<Entry> {
    let mut entries = Vec::new();
    for class in classes {
        for (rep, variant) in class.variants.iter().enumerate() {
            let mut facts = vec![Fact::relation("special", [variant.special])];
            facts.extend(edge_facts("edge", &variant.links));
            entries.push(Entry {
                key: InstanceKey::new(format!("cutedge-{}-{}-{rep}", class.nodes, class.percentage)),
                variant: format!("{}%", class.percentage),
                size: class.nodes,
                rep: rep as u32,
                facts,
            });
        }
    }
    entries
}

fn graph5col_entries(classes: Vec<Graph5ColClass>) -> Vec<Entry> {
    let mut entries = Vec::new();
    for class in classes {
        let density = class.edges as f64 / class.nodes as f64;
        for (rep, links) in class.variants.iter().enumerate() {
            // Instance numbers absent from the import.
            let Some(links) = links else { continue };
            let mut facts: Vec<Fact> = (1..=class.nodes as i64)
                .map(|node| Fact::relation("node", [node]))
                .collect();
            facts.extend(edge_facts("link", links));
            entries.push(Entry {
                key: InstanceKey::new(format!(
                    "graph5col-{}-{}-{}",
                    class.nodes,
                    links.len() / 2,
                    rep + 1
                )),
                variant: density.to_string(),
                size: class.nodes,
                rep: rep as u32,
                facts,
            });
        }
    }
    entries
}

impl Suite for DataSuite {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn cells(&self, _repetitions: u32) -> Vec<Cell> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| Cell {
                key: entry.key.clone(),
                variant: entry.variant.clone(),
                size: entry.size,
                rep: entry.rep,
                seed: rep_seed(index as u64 + 1),
                index,
            })
            .collect()
    }

    fn trials(&self, _cell: &Cell) -> Vec<Trial> {
        use BackendKind::{GroundingSolver as Clingo, JvmSolver as Alpha, StreamEvaluator as Dusa};

        match self.kind {
            DataSuiteKind::Reachability => [Dusa, Clingo, Alpha]
                .into_iter()
                .map(|backend| {
                    Trial::new("reachability", Dialect::PureAsp, backend, "reachability", Relation::new("reachable", 2))
                        .with_solutions(10)
                })
                .collect(),
            DataSuiteKind::CutEdge => vec![Trial::new(
                "cutedge",
                Dialect::PureAsp,
                Dusa,
                "cutedge",
                Relation::new("reachable", 2),
            )
            .with_solutions(10)],
            DataSuiteKind::Graph5Col => vec![
                Trial::new("graph5col", Dialect::Fclp, Dusa, "graph5col", Relation::new("isRed", 1)).with_solutions(10),
                Trial::new("graph5col", Dialect::PureAsp, Alpha, "graph5col", Relation::new("numRed", 1))
                    .with_solutions(10)
                    .with_measure(Measure::ArgumentSum),
                Trial::new("graph5col", Dialect::PureAsp, Clingo, "graph5col", Relation::new("numRed", 1))
                    .with_solutions(10)
                    .with_measure(Measure::ArgumentSum),
            ],
        }
    }

    fn instance(&mut self, cell: &Cell) -> aspbench_core::Result<ProblemInstance> {
        let entry = self
            .entries
            .get(cell.index)
            .ok_or_else(|| CoreError::InvalidInput(format!("no instance for cell {}", cell.key)))?;
        Ok(ProblemInstance::from_facts(
            self.kind.name(),
            entry.size,
            entry.facts.clone(),
        ))
    }
}
