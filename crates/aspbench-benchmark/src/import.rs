//! Conversion of graph-coloring instance files into suite input data.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{BenchmarkError, Result};
use crate::suites::Graph5ColClass;

const FILE_PREFIX: &str = "instance";

/// Highest instance number accepted within one class.
pub const MAX_INSTANCE_NUMBER: u64 = 10_000;

/// Reads every `instance<nodes>_<edges>_<num>` file in `dir`.
///
/// Only `link(a,b).` lines are kept. Classes are keyed `<nodes>/<edges>`
/// and instance `num` lands at variant index `num - 1`.
pub fn read_graph5col(dir: &Path) -> Result<BTreeMap<String, Graph5ColClass>> {
    let mut classes: BTreeMap<String, Graph5ColClass> = BTreeMap::new();

    let mut paths: Vec<_> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    paths.sort();

    for path in paths {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(rest) = name.strip_prefix(FILE_PREFIX) else {
            continue;
        };
        let (nodes, edges, num) = parse_instance_name(rest).ok_or_else(|| BenchmarkError::SuiteData {
            path: path.clone(),
            reason: "expected a name of the form instance<nodes>_<edges>_<num>".to_string(),
        })?;
        if num > MAX_INSTANCE_NUMBER {
            return Err(BenchmarkError::SuiteData {
                path,
                reason: format!("instance number {num} exceeds {MAX_INSTANCE_NUMBER}"),
            });
        }

        let contents = fs::read_to_string(&path)?;
        let links = contents
            .lines()
            .filter_map(|line| line.strip_prefix("link("))
            .map(|args| parse_link(args).ok_or_else(|| malformed_link(&path, args)))
            .collect::<Result<Vec<_>>>()?;

        let class = classes
            .entry(format!("{nodes}/{edges}"))
            .or_insert_with(|| Graph5ColClass {
                nodes,
                edges,
                variants: Vec::new(),
            });
        let index = (num - 1) as usize;
        if class.variants.len() <= index {
            class.variants.resize(index + 1, None);
        }
        class.variants[index] = Some(links);
    }

    Ok(classes)
}

/// Converts the instance files in `dir` and writes them to `out` as
/// four-space indented JSON. Returns the number of instances read.
pub fn import_graph5col(dir: &Path, out: &Path) -> Result<usize> {
    let classes = read_graph5col(dir)?;
    let instances = classes
        .values()
        .map(|class| class.variants.iter().flatten().count())
        .sum();

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(fs::File::create(out)?);
    let mut serializer = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    classes.serialize(&mut serializer)?;
    writer.flush()?;

    tracing::info!(
        event = "import",
        classes = classes.len() as u64,
        instances = instances as u64,
        out = %out.display()
    );
    Ok(instances)
}

/// Parses `<nodes>_<edges>_<num>`, ignoring anything after each number's
/// digits. Instance numbers start at 1.
fn parse_instance_name(rest: &str) -> Option<(u64, u64, u64)> {
    let mut parts = rest.split('_').map(leading_int);
    let nodes = parts.next()??;
    let edges = parts.next()??;
    let num = parts.next()??;
    (num > 0).then_some((nodes, edges, num))
}

fn leading_int(s: &str) -> Option<u64> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

fn parse_link(args: &str) -> Option<(i64, i64)> {
    let (a, b) = args.split_once(',')?;
    let b = b.trim_end().trim_end_matches('.').trim_end_matches(')');
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

fn malformed_link(path: &Path, args: &str) -> BenchmarkError {
    BenchmarkError::SuiteData {
        path: path.to_path_buf(),
        reason: format!("malformed link: link({args}"),
    }
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
