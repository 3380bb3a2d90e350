use std::fs;

use super::*;
use crate::suites::{DataSuite, DataSuiteKind};

#[test]
fn test_parse_instance_name() {
    assert_eq!(parse_instance_name("100_450_3"), Some((100, 450, 3)));
    assert_eq!(parse_instance_name("4_6_1.lp"), Some((4, 6, 1)));
    assert_eq!(parse_instance_name("4_6"), None);
    assert_eq!(parse_instance_name("4_6_0"), None);
    assert_eq!(parse_instance_name("x_6_1"), None);
}

#[test]
fn test_parse_link() {
    assert_eq!(parse_link("1,2)."), Some((1, 2)));
    assert_eq!(parse_link("10, 20).\r"), Some((10, 20)));
    assert_eq!(parse_link("a,2)."), None);
}

#[test]
fn test_read_places_variants_by_number() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("instance4_6_2"), "node(1).\nlink(1,2).\nlink(2,1).\n").unwrap();
    fs::write(dir.path().join("instance4_6_1"), "link(3,4).\n").unwrap();
    fs::write(dir.path().join("instance5_8_3.lp"), "link(1,5).\n").unwrap();
    fs::write(dir.path().join("README"), "ignored").unwrap();

    let classes = read_graph5col(dir.path()).unwrap();

    assert_eq!(classes.len(), 2);
    let small = &classes["4/6"];
    assert_eq!((small.nodes, small.edges), (4, 6));
    assert_eq!(
        small.variants,
        vec![Some(vec![(3, 4)]), Some(vec![(1, 2), (2, 1)])]
    );
    assert_eq!(classes["5/8"].variants, vec![None, None, Some(vec![(1, 5)])]);
}

#[test]
fn test_bad_instance_name_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("instance_oops"), "link(1,2).\n").unwrap();

    assert!(matches!(
        read_graph5col(dir.path()),
        Err(BenchmarkError::SuiteData { .. })
    ));
}

#[test]
fn test_oversized_instance_number_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("instance5_10_18446744073709551615"), "link(1,2).\n").unwrap();

    let err = read_graph5col(dir.path()).unwrap_err();
    assert!(matches!(err, BenchmarkError::SuiteData { ref reason, .. } if reason.contains("exceeds")));

    fs::remove_file(dir.path().join("instance5_10_18446744073709551615")).unwrap();
    fs::write(dir.path().join(format!("instance5_10_{MAX_INSTANCE_NUMBER}")), "link(1,2).\n").unwrap();
    let classes = read_graph5col(dir.path()).unwrap();
    assert_eq!(classes["5/10"].variants.len(), MAX_INSTANCE_NUMBER as usize);
}

#[test]
fn test_import_output_loads_as_suite() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("instance4_6_1"), "link(1,2).\nlink(2,1).\n").unwrap();
    fs::write(dir.path().join("instance4_6_3"), "link(3,4).\nlink(4,3).\n").unwrap();
    let out = dir.path().join("data").join("test-graph5col.json");

    assert_eq!(import_graph5col(dir.path(), &out).unwrap(), 2);

    let json = fs::read_to_string(&out).unwrap();
    assert!(json.starts_with("{\n    \"4/6\": {\n        \"nodes\": 4,"));
    assert!(json.contains("null"));

    let suite = DataSuite::load(DataSuiteKind::Graph5Col, out.parent().unwrap()).unwrap();
    assert_eq!(suite.len(), 2);
}
