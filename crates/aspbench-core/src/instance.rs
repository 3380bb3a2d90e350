//! Problem instances and their on-disk cache.
//!
//! An instance is built once per deterministic key and written to the scratch
//! directory as `<key>.json` (structured facts) and `<key>.lp` (fact text).
//! Files are written atomically and never overwritten, so concurrent readers
//! always see either nothing or a complete file.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Result;
use crate::facts::{encode_graph, EncodedFacts, Fact, GraphEncoding};
use crate::graph::{Graph, StructuralFamily};

/// Deterministic cache name of an instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceKey(String);

impl InstanceKey {
    /// Creates a key from a file stem.
    ///
    /// Path separators are replaced so the key always names a single file.
    pub fn new(stem: impl Into<String>) -> Self {
        let stem: String = stem.into();
        Self(stem.replace(['/', '\\'], "_"))
    }

    /// Key of a generated graph, e.g. `graph-dense-random-256`.
    pub fn graph(family: StructuralFamily, edges: usize) -> Self {
        Self::new(format!("graph-{family}-{edges}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The source an instance was encoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceData {
    Graph(Graph),
    Facts(Vec<Fact>),
}

/// One concrete problem instance with both encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemInstance {
    /// Graph family or problem tag the instance belongs to.
    pub family: String,
    pub size: u64,
    pub data: InstanceData,
    pub encoded: EncodedFacts,
}

impl ProblemInstance {
    pub fn from_graph(family: StructuralFamily, graph: Graph, encoding: &GraphEncoding) -> Self {
        let encoded = encode_graph(&graph, encoding);
        Self {
            family: family.to_string(),
            size: graph.edge_count() as u64,
            data: InstanceData::Graph(graph),
            encoded,
        }
    }

    pub fn from_facts(family: impl Into<String>, size: u64, facts: Vec<Fact>) -> Self {
        Self {
            family: family.into(),
            size,
            encoded: EncodedFacts::from_facts(facts.clone()),
            data: InstanceData::Facts(facts),
        }
    }
}

/// Paths of an instance's encoded files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceFiles {
    /// Fact text, consumed by the answer-set solvers.
    pub text: PathBuf,
    /// JSON fact list, consumed by the stream evaluator.
    pub structured: PathBuf,
}

/// Whether [`InstanceStore::ensure`] had to build the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Cached,
    Generated,
}

/// Write-once file cache of encoded instances.
#[derive(Debug, Clone)]
pub struct InstanceStore {
    dir: PathBuf,
}

impl InstanceStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self, key: &InstanceKey) -> InstanceFiles {
        InstanceFiles {
            text: self.dir.join(format!("{key}.lp")),
            structured: self.dir.join(format!("{key}.json")),
        }
    }

    pub fn contains(&self, key: &InstanceKey) -> bool {
        let files = self.files(key);
        files.structured.exists() && files.text.exists()
    }

    /// Returns the files for `key`, calling `build` only if nothing is cached.
    ///
    /// The structured file is authoritative: it is written first, and the
    /// text file is always derived from it.
    pub fn ensure<F>(&self, key: &InstanceKey, build: F) -> Result<(InstanceFiles, CacheStatus)>
    where
        F: FnOnce() -> Result<ProblemInstance>,
    {
        let files = self.files(key);

        let status = if files.structured.exists() {
            tracing::debug!(event = "instance_cached", key = key.as_str());
            CacheStatus::Cached
        } else {
            let instance = build()?;
            write_once(&files.structured, instance.encoded.structured_json()?.as_bytes())?;
            tracing::info!(
                event = "instance_generated",
                key = key.as_str(),
                facts = instance.encoded.structured.len() as u64
            );
            CacheStatus::Generated
        };

        if !files.text.exists() {
            let facts: Vec<Fact> = serde_json::from_str(&fs::read_to_string(&files.structured)?)?;
            write_once(&files.text, EncodedFacts::from_facts(facts).text.as_bytes())?;
        }

        Ok((files, status))
    }

    /// Reads back both cached encodings of `key`.
    pub fn read(&self, key: &InstanceKey) -> Result<(String, String)> {
        let files = self.files(key);
        Ok((
            fs::read_to_string(files.text)?,
            fs::read_to_string(files.structured)?,
        ))
    }
}

/// Writes `contents` to `path` unless it already exists.
///
/// The data goes to a temporary file in the same directory first and is
/// moved into place without clobbering, so a racing writer simply loses.
pub fn write_once(path: &Path, contents: &[u8]) -> io::Result<()> {
    if path.exists() {
        return Ok(());
    }
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.flush()?;
    match file.persist_noclobber(path) {
        Ok(_) => Ok(()),
        Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(err) => Err(err.error),
    }
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod tests;
