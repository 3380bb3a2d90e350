//! Tests for the graph model.

use super::*;

#[test]
fn test_rejects_out_of_range_edges() {
    let err = Graph::new(3, vec![(0, 3)]).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn test_json_layout_matches_library_files() {
    let graph = Graph::new(2, vec![(0, 1)]).unwrap();
    let json = serde_json::to_string(&graph).unwrap();
    assert_eq!(json, r#"{"edges":[[0,1]],"numNodes":2}"#);

    let back: Graph = serde_json::from_str(&json).unwrap();
    assert_eq!(back, graph);
}

#[test]
fn test_validate_catches_bad_deserialized_graph() {
    let graph: Graph = serde_json::from_str(r#"{"edges":[[0,5]],"numNodes":2}"#).unwrap();
    assert!(graph.validate().is_err());
}

#[test]
fn test_family_names_round_trip() {
    for family in StructuralFamily::ALL {
        assert_eq!(family.as_str().parse::<StructuralFamily>(), Ok(family));
        let json = serde_json::to_string(&family).unwrap();
        assert_eq!(json, format!("\"{}\"", family.as_str()));
    }
    assert!("dense".parse::<StructuralFamily>().is_err());
}
