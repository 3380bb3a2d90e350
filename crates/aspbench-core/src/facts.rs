//! Fact encodings of problem instances.
//!
//! Every instance is handed to the backends in two interchangeable forms:
//!
//! - **text**: one `name(arg1,arg2,...).` fact per line, read by the answer-set
//!   solvers;
//! - **structured**: a JSON array of `{"name", "args", "value"?}` records, read
//!   by the stream evaluator. `value` is only present on 0-arity scalar facts.
//!
//! Both forms denote the same fact set. [`FactSet`] normalizes either form so
//! they can be compared without caring about ordering.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::graph::Graph;

/// A ground fact.
///
/// # Example
///
/// ```
/// use aspbench_core::Fact;
///
/// assert_eq!(Fact::relation("edge", [0, 1]).to_string(), "edge(0,1).");
/// assert_eq!(Fact::scalar("size", 8).to_string(), "size(8).");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fact {
    pub name: String,
    pub args: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

impl Fact {
    /// A relational fact with positional arguments.
    pub fn relation(name: impl Into<String>, args: impl Into<Vec<i64>>) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
            value: None,
        }
    }

    /// A 0-arity fact carrying a single value, such as a size parameter.
    pub fn scalar(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            value: Some(value),
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.value.is_some()
    }

    /// The predicate name and argument tuple this fact denotes.
    ///
    /// A scalar fact `size = 8` denotes the atom `size(8)`, which is also what
    /// its text form says.
    pub fn atom(&self) -> (String, Vec<i64>) {
        let mut args = self.args.clone();
        args.extend(self.value);
        (self.name.clone(), args)
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, args) = self.atom();
        if args.is_empty() {
            return write!(f, "{name}.");
        }
        write!(f, "{name}(")?;
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(").")
    }
}

/// Predicate names used when a graph is written out as facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEncoding {
    pub node: String,
    pub edge: String,
    /// Added to every node id on output.
    pub offset: i64,
}

impl GraphEncoding {
    pub fn new(node: impl Into<String>, edge: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            edge: edge.into(),
            offset: 0,
        }
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }
}

impl Default for GraphEncoding {
    fn default() -> Self {
        Self::new("node", "edge")
    }
}

/// The two encoded forms of one fact set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFacts {
    pub text: String,
    pub structured: Vec<Fact>,
}

impl EncodedFacts {
    /// Encodes facts in the given order.
    pub fn from_facts(facts: Vec<Fact>) -> Self {
        let mut text = String::new();
        for fact in &facts {
            text.push_str(&fact.to_string());
            text.push('\n');
        }
        Self {
            text,
            structured: facts,
        }
    }

    /// The structured form as a compact JSON array.
    pub fn structured_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.structured)?)
    }
}

/// Encodes a graph as `node(i).` facts followed by `edge(u,v).` facts.
///
/// # Example
///
/// ```
/// use aspbench_core::{encode_graph, Graph, GraphEncoding};
///
/// let graph = Graph::new(2, vec![(0, 1)]).unwrap();
/// let encoded = encode_graph(&graph, &GraphEncoding::default());
/// assert_eq!(encoded.text, "node(0).\nnode(1).\nedge(0,1).\n");
/// ```
pub fn encode_graph(graph: &Graph, encoding: &GraphEncoding) -> EncodedFacts {
    let offset = encoding.offset;
    let nodes = (0..graph.node_count()).map(|i| Fact::relation(&*encoding.node, [i as i64 + offset]));
    let edges = graph
        .edges()
        .iter()
        .map(|&(u, v)| Fact::relation(&*encoding.edge, [u as i64 + offset, v as i64 + offset]));
    EncodedFacts::from_facts(nodes.chain(edges).collect())
}

static FACT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z][A-Za-z0-9_']*)\s*(?:\(\s*(-?\d+(?:\s*,\s*-?\d+)*)?\s*\))?\s*\.$")
        .expect("fact pattern is valid")
});

/// Parses fact text, one fact per line. Blank lines and `%` comments are skipped.
///
/// Text cannot tell a scalar from a unary relation, so every parsed fact is
/// relational.
pub fn parse_fact_text(text: &str) -> Result<Vec<Fact>> {
    let mut facts = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let captures = FACT_LINE.captures(line).ok_or_else(|| CoreError::FactSyntax {
            line: index + 1,
            text: raw.to_string(),
        })?;
        let args = match captures.get(2) {
            Some(list) => list
                .as_str()
                .split(',')
                .map(|arg| arg.trim().parse::<i64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|_| CoreError::FactSyntax {
                    line: index + 1,
                    text: raw.to_string(),
                })?,
            None => Vec::new(),
        };
        facts.push(Fact::relation(&captures[1], args));
    }
    Ok(facts)
}

/// An order-insensitive view of a fact collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactSet {
    atoms: BTreeSet<(String, Vec<i64>)>,
}

impl FactSet {
    pub fn from_facts<'a>(facts: impl IntoIterator<Item = &'a Fact>) -> Self {
        Self {
            atoms: facts.into_iter().map(Fact::atom).collect(),
        }
    }

    pub fn from_text(text: &str) -> Result<Self> {
        Ok(Self::from_facts(&parse_fact_text(text)?))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let facts: Vec<Fact> = serde_json::from_str(json)?;
        Ok(Self::from_facts(&facts))
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn contains(&self, name: &str, args: &[i64]) -> bool {
        self.atoms.contains(&(name.to_string(), args.to_vec()))
    }

    /// Argument tuples of every atom named `name` with the given arity.
    pub fn tuples<'a>(&'a self, name: &'a str, arity: usize) -> impl Iterator<Item = &'a [i64]> {
        self.atoms
            .iter()
            .filter(move |(n, args)| n == name && args.len() == arity)
            .map(|(_, args)| args.as_slice())
    }
}

/// Rebuilds a graph from its fact encoding.
///
/// Node facts must name the contiguous ids `offset..offset + n`. Edges come
/// back in sorted order.
pub fn decode_graph(facts: &FactSet, encoding: &GraphEncoding) -> Result<Graph> {
    let offset = encoding.offset;
    let node_count = facts.tuples(&encoding.node, 1).count();
    for (expected, args) in facts.tuples(&encoding.node, 1).enumerate() {
        if args[0].checked_sub(offset) != Some(expected as i64) {
            return Err(CoreError::InvalidInput(format!(
                "node ids are not contiguous from {offset}: found {}",
                args[0]
            )));
        }
    }

    let edges = facts
        .tuples(&encoding.edge, 2)
        .map(|args| {
            let id = |arg: i64| arg.checked_sub(offset).and_then(|id| usize::try_from(id).ok());
            match (id(args[0]), id(args[1])) {
                (Some(u), Some(v)) => Ok((u, v)),
                _ => Err(CoreError::InvalidInput(format!(
                    "edge ({}, {}) out of range for node offset {offset}",
                    args[0], args[1]
                ))),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Graph::new(node_count, edges)
}

#[cfg(test)]
#[path = "facts_tests.rs"]
mod tests;
