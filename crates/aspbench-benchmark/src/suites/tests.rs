use aspbench_core::{FactSet, GraphGenerator, GraphLibrary, InstanceData, StructuralFamily};
use aspbench_runner::{BackendKind, Measure};
use aspbench_test::data;

use super::*;

#[test]
fn test_suite_names_round_trip() {
    for kind in SuiteKind::ALL {
        assert_eq!(kind.as_str().parse::<SuiteKind>().unwrap(), kind);
    }
    assert!(matches!(
        "tsp".parse::<SuiteKind>(),
        Err(BenchmarkError::UnknownSuite(name)) if name == "tsp"
    ));
}

#[test]
fn test_graph_suite_from_library() {
    let library: Vec<aspbench_core::GraphSet> = serde_json::from_str(data::GRAPH_LIBRARY).unwrap();
    let mut lib = GraphLibrary::default();
    lib.extend(library).unwrap();
    let mut suite = GraphSuite::from_library(lib);

    let cells = suite.cells(2);
    let summary: Vec<(&str, u64, u32, u64)> = cells
        .iter()
        .map(|c| (c.variant.as_str(), c.size, c.rep, c.seed))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("dense-random", 2, 1, 0xcafe + 0xbeef),
            ("dense-random", 2, 2, 0xcafe + 2 * 0xbeef),
            ("sparse-linear", 2, 1, 0xcafe + 0xbeef),
            ("sparse-linear", 2, 2, 0xcafe + 2 * 0xbeef),
        ]
    );
    assert_eq!(cells[0].key.as_str(), "graph-dense-random-2");
    assert_eq!(cells[0].key, cells[1].key);

    let instance = suite.instance(&cells[2]).unwrap();
    assert!(matches!(&instance.data, InstanceData::Graph(g) if g.edges() == [(0, 1), (2, 3)]));
    assert_eq!(suite.shard_name(), "graph-tests.csv");
}

#[test]
fn test_graph_trials() {
    let suite = GraphSuite::generated(&[], &[], GraphGenerator::seeded(1));
    let cell_trials = suite.trials(&Cell {
        key: aspbench_core::InstanceKey::new("x"),
        variant: String::new(),
        size: 0,
        rep: 1,
        seed: 0,
        index: 0,
    });
    assert_eq!(cell_trials.len(), 10);
    assert_eq!(cell_trials[0].program_file(), "spanning-tree.dusa");
    assert_eq!(cell_trials[3].program_file(), "spanning-tree-clingo-asp.lp");
    assert_eq!(cell_trials[3].relation.to_string(), "inTree/1");
    assert_eq!(
        cell_trials.iter().filter(|t| t.backend == BackendKind::JvmSolver).count(),
        2
    );
}

#[test]
fn test_generated_graph_suite_builds_exact_graphs() {
    let mut suite = GraphSuite::generated(
        &[StructuralFamily::SparseCycles, StructuralFamily::SparseLinear],
        &[32, 64],
        GraphGenerator::seeded(5),
    );
    let cells = suite.cells(1);
    assert_eq!(cells.len(), 4);
    assert_eq!(cells[1].key.as_str(), "graph-sparse-cycles-64");
    for cell in &cells {
        let instance = suite.instance(cell).unwrap();
        let InstanceData::Graph(graph) = &instance.data else {
            panic!("graph suite built a non-graph instance");
        };
        assert_eq!(graph.edge_count() as u64, cell.size);
    }
}

#[test]
fn test_generation_failure_surfaces_as_error() {
    let mut suite = GraphSuite::generated(&[StructuralFamily::SparseCycles], &[7], GraphGenerator::seeded(5));
    let cells = suite.cells(1);
    assert!(matches!(
        suite.instance(&cells[0]),
        Err(aspbench_core::CoreError::Generation(_))
    ));
}

#[test]
fn test_queens_suite() {
    let mut suite = ScalarSuite::queens();
    let cells = suite.cells(3);
    assert_eq!(cells.len(), 19 * 3);
    assert_eq!(cells[0].key.as_str(), "queens-1");

    let trials = suite.trials(&cells[0]);
    let variants: Vec<_> = trials.iter().map(|t| t.variant.clone().unwrap()).collect();
    assert_eq!(variants, vec!["clingo-0", "dusa-1", "dusa-2", "dusa-3", "clingo-4"]);
    assert!(trials.iter().all(|t| t.solutions == 10));
    assert_eq!(trials[0].measure, Measure::ArgumentSum);

    let instance = suite.instance(&cells[0]).unwrap();
    assert_eq!(instance.encoded.text, "size(1).\n");
    assert_eq!(
        instance.encoded.structured_json().unwrap(),
        r#"[{"name":"size","args":[],"value":1}]"#
    );
}

#[test]
fn test_ground_explosion_and_mapgen_facts() {
    let mut explosion = ScalarSuite::ground_explosion();
    let cell = explosion.cells(1).remove(4);
    assert_eq!(cell.size, 6);
    assert_eq!(explosion.instance(&cell).unwrap().encoded.text, "dom(6).\n");
    let variants: Vec<_> = explosion
        .trials(&cell)
        .into_iter()
        .map(|t| (t.backend, t.variant.unwrap(), t.solutions))
        .collect();
    assert_eq!(variants.len(), 6);
    assert_eq!(variants[1], (BackendKind::StreamEvaluator, "return-10".to_string(), 10));

    let mut mapgen = ScalarSuite::map_generation();
    let cell = mapgen.cells(1).remove(0);
    let instance = mapgen.instance(&cell).unwrap();
    assert_eq!(instance.encoded.text, "width(5).\nlength(11).\n");
    assert!(mapgen.trials(&cell).iter().all(|t| t.solutions == 5));
}

#[test]
fn test_reachability_suite_orders_by_nodes() {
    let mut suite = DataSuite::from_json(DataSuiteKind::Reachability, data::REACHABILITY).unwrap();
    let cells = suite.cells(3);
    let summary: Vec<(u64, u32, u64, &str)> = cells
        .iter()
        .map(|c| (c.size, c.rep, c.seed, c.key.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (10, 0, 0xcafe + 0xbeef, "reachability-10-2-0"),
            (20, 0, 0xcafe + 2 * 0xbeef, "reachability-20-2-0"),
            (20, 1, 0xcafe + 3 * 0xbeef, "reachability-20-2-1"),
        ]
    );
    assert_eq!(cells[2].variant, "2");

    let instance = suite.instance(&cells[2]).unwrap();
    assert_eq!(instance.encoded.text, "start(7).\nedge(7,1).\n");
    assert_eq!(suite.trials(&cells[0]).len(), 3);
}

#[test]
fn test_cutedge_suite() {
    let mut suite = DataSuite::from_json(DataSuiteKind::CutEdge, data::CUTEDGE).unwrap();
    let cells = suite.cells(1);
    assert_eq!(cells[0].variant, "50%");
    let trials = suite.trials(&cells[0]);
    assert_eq!(trials.len(), 1);
    assert_eq!(trials[0].backend, BackendKind::StreamEvaluator);

    let facts = FactSet::from_text(&suite.instance(&cells[0]).unwrap().encoded.text).unwrap();
    assert!(facts.contains("special", &[2]));
    assert!(facts.contains("edge", &[2, 3]));
}

#[test]
fn test_graph5col_suite() {
    let mut suite = DataSuite::from_json(DataSuiteKind::Graph5Col, data::GRAPH5COL).unwrap();
    let cells = suite.cells(1);
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].key.as_str(), "graph5col-4-3-1");
    assert_eq!(cells[0].variant, "1.5");
    assert_eq!(cells[0].size, 4);

    let instance = suite.instance(&cells[0]).unwrap();
    let facts = FactSet::from_facts(&instance.encoded.structured);
    assert_eq!(facts.tuples("node", 1).count(), 4);
    assert!(facts.contains("node", &[4]));
    assert!(!facts.contains("node", &[0]));
    assert!(facts.contains("link", &[3, 4]));
}

#[test]
fn test_missing_data_file_is_suite_data_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        DataSuite::load(DataSuiteKind::Reachability, dir.path()),
        Err(BenchmarkError::SuiteData { .. })
    ));

    std::fs::write(dir.path().join("test-cutedge.json"), "{ not json").unwrap();
    assert!(matches!(
        DataSuite::load(DataSuiteKind::CutEdge, dir.path()),
        Err(BenchmarkError::SuiteData { .. })
    ));
}
