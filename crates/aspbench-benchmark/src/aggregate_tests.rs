use std::fs;

use chrono::NaiveDate;

use super::*;

fn shard(rows: &[&str]) -> String {
    let mut contents = format!("{HEADER}\n");
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    contents
}

#[test]
fn test_merge_concatenates_in_shard_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("graph-tests.csv");
    let b = dir.path().join("queens-tests.csv");
    fs::write(&a, shard(&["spanning-tree,fclp,dusa,sparse-linear,32,1,1.5,1,31"])).unwrap();
    fs::write(&b, shard(&["n-queens,fclp,dusa,dusa-1,8,1,2,10,80", "n-queens,fclp,dusa,dusa-1,8,2,2,10,80"])).unwrap();
    let out = dir.path().join("merged.csv");

    let rows = merge(&[&b, &a], &out).unwrap();

    assert_eq!(rows, 3);
    let merged = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = merged.lines().collect();
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].starts_with("n-queens"));
    assert!(lines[3].starts_with("spanning-tree"));
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_merge_keeps_duplicate_rows() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("graph-tests.csv");
    fs::write(&a, shard(&["p,d,s,v,1,1,1,1,1"])).unwrap();
    let out = dir.path().join("merged.csv");

    assert_eq!(merge(&[&a, &a], &out).unwrap(), 2);
}

#[test]
fn test_header_mismatch_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("graph-tests.csv");
    let bad = dir.path().join("queens-tests.csv");
    fs::write(&good, shard(&["p,d,s,v,1,1,1,1,1"])).unwrap();
    fs::write(&bad, "Problem,System,Time\np,s,1\n").unwrap();
    let out = dir.path().join("merged.csv");

    let err = merge(&[&good, &bad], &out).unwrap_err();

    match err {
        BenchmarkError::HeaderMismatch { path, found } => {
            assert_eq!(path, bad);
            assert_eq!(found, "Problem,System,Time");
        }
        other => panic!("expected a header mismatch, got {other}"),
    }
    assert!(!out.exists());
}

#[test]
fn test_empty_shard_contributes_no_rows() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("cutedge-tests.csv");
    fs::write(&empty, format!("{HEADER}\n")).unwrap();
    let out = dir.path().join("merged.csv");

    assert_eq!(merge(&[&empty], &out).unwrap(), 0);
    assert_eq!(fs::read_to_string(&out).unwrap(), format!("{HEADER}\n"));
}

#[test]
fn test_discover_shards() {
    let dir = tempfile::tempdir().unwrap();
    for name in [
        "queens-tests.csv",
        "graph-tests.csv",
        "all-tests-2024-01-31.csv",
        "notes.csv",
        "graph-tests.txt",
    ] {
        fs::write(dir.path().join(name), "").unwrap();
    }

    let shards = discover_shards(dir.path()).unwrap();

    let names: Vec<_> = shards
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(names, vec!["graph-tests.csv", "queens-tests.csv"]);
}

#[test]
fn test_gather_writes_dated_report() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("graph-tests.csv"), shard(&["a,b,c,d,1,1,1,1,1"])).unwrap();
    fs::write(dir.path().join("mapgen-tests.csv"), shard(&["e,f,g,h,1,1,1,1,1"])).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

    let out = gather(dir.path(), date).unwrap();

    assert_eq!(out, dir.path().join("all-tests-2024-03-07.csv"));
    let merged = fs::read_to_string(&out).unwrap();
    assert_eq!(merged.lines().count(), 3);

    // A second gather must not pick up the merged report.
    assert_eq!(discover_shards(dir.path()).unwrap().len(), 2);
}
