//! Canned solver output and suite input data.

/// Stream evaluator output with three solutions of sizes 3, 4 and 5.
pub const DUSA_THREE_SOLUTIONS: &str = "(3)\n(4)\n(5)\nDONE";

/// Stream evaluator output cut off before its completion marker.
pub const DUSA_TRUNCATED: &str = "(3)\n(4)\n(5";

/// Grounding solver `-V0` output: two models of `inTree/1`.
pub const CLINGO_TWO_MODELS: &str = "inTree(1) inTree(2) inTree(3)\ninTree(1) inTree(4)\nSATISFIABLE";

/// Grounding solver `-V0` output: two models of the counter `numqueens/1`.
pub const CLINGO_COUNTERS: &str = "numqueens(8)\nnumqueens(8)\nSATISFIABLE";

pub const CLINGO_UNSATISFIABLE: &str = "UNSATISFIABLE";

/// JVM solver output with two answer sets filtered to `inTree`.
pub const ALPHA_TWO_ANSWER_SETS: &str = "Answer set 1:\n{ inTree(1), inTree(2) }\nAnswer set 2:\n{ inTree(1), inTree(2), inTree(3) }\nSATISFIABLE";

/// A graph library with one 2-edge set.
pub const GRAPH_LIBRARY: &str = r#"[
  {
    "numEdges": 2,
    "graphs": {
      "sparse-linear": { "edges": [[0, 1], [2, 3]], "numNodes": 4 },
      "dense-random": { "edges": [[0, 1], [1, 2]], "numNodes": 3 }
    }
  }
]"#;

/// Reachability input: one instance class with two variants.
pub const REACHABILITY: &str = r#"{
  "20/2": { "nodes": 20, "multiplier": 2, "variants": [
    { "start": 3, "links": [[3, 4], [4, 5]] },
    { "start": 7, "links": [[7, 1]] }
  ] },
  "10/2": { "nodes": 10, "multiplier": 2, "variants": [
    { "start": 0, "links": [[0, 1]] }
  ] }
}"#;

/// Cut-edge input: one instance class with one variant.
pub const CUTEDGE: &str = r#"{
  "10/50": { "nodes": 10, "percentage": 50, "variants": [
    { "special": 2, "links": [[1, 2], [2, 3]] }
  ] }
}"#;

/// Graph-coloring input in the layout written by `import-graph5col`.
pub const GRAPH5COL: &str = r#"{
    "4/6": {
        "nodes": 4,
        "edges": 6,
        "variants": [
            [[1, 2], [2, 1], [2, 3], [3, 2], [3, 4], [4, 3]]
        ]
    }
}"#;
