//! Merging result shards into one report.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::error::{BenchmarkError, Result};
use crate::result::HEADER;

/// Merges `shards` into `out`.
///
/// Every shard must start with the result header, otherwise nothing is
/// written. Body rows are concatenated in shard order.
pub fn merge<P: AsRef<Path>>(shards: &[P], out: &Path) -> Result<usize> {
    let mut bodies = Vec::with_capacity(shards.len());
    for shard in shards {
        let path = shard.as_ref();
        let contents = fs::read_to_string(path)?;
        let (header, body) = contents.split_once('\n').unwrap_or((contents.as_str(), ""));
        let header = header.trim_end_matches('\r');
        if header != HEADER {
            return Err(BenchmarkError::HeaderMismatch {
                path: path.to_path_buf(),
                found: header.to_string(),
            });
        }
        bodies.push(body.trim().to_string());
    }

    let mut file = fs::File::create(out)?;
    writeln!(file, "{HEADER}")?;
    let mut rows = 0;
    for body in bodies.iter().filter(|body| !body.is_empty()) {
        writeln!(file, "{body}")?;
        rows += body.lines().count();
    }
    file.flush()?;

    tracing::info!(
        event = "merge",
        shards = shards.len() as u64,
        rows = rows as u64,
        out = %out.display()
    );
    Ok(rows)
}

/// Lists the shard files in `dir`, sorted by name.
///
/// A shard is a `.csv` file whose stem has exactly one `-`, such as
/// `graph-tests.csv`. Merged reports like `all-tests-2024-01-31.csv` do not
/// qualify.
pub fn discover_shards(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut shards = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if stem.matches('-').count() == 1 {
            shards.push(path);
        }
    }
    shards.sort();
    Ok(shards)
}

/// Merged report name for `date`.
pub fn report_name(date: NaiveDate) -> String {
    format!("all-tests-{}.csv", date.format("%Y-%m-%d"))
}

/// Merges every shard in `dir` into `all-tests-<date>.csv` in the same
/// directory and returns its path.
pub fn gather(dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let shards = discover_shards(dir)?;
    let out = dir.join(report_name(date));
    merge(&shards, &out)?;
    Ok(out)
}

/// [`gather`] dated with today's local date.
pub fn gather_today(dir: &Path) -> Result<PathBuf> {
    gather(dir, Local::now().date_naive())
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
