//! Undirected graphs with an exact edge count.

mod family;
mod generator;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

pub use family::StructuralFamily;
pub use generator::{GraphGenerator, DEFAULT_MAX_ATTEMPTS};

/// A generated graph.
///
/// Nodes are the integers `0..node_count`. Edges are stored in the order the
/// generator produced them; for the random families that is row-major
/// `(i, j)` order with `i < j`.
///
/// Serializes as `{"edges": [[u, v], ...], "numNodes": n}`, the layout used by
/// the graph library data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    edges: Vec<(usize, usize)>,
    #[serde(rename = "numNodes")]
    node_count: usize,
}

impl Graph {
    /// Creates a graph, checking that every endpoint is a valid node.
    ///
    /// # Example
    ///
    /// ```
    /// use aspbench_core::Graph;
    ///
    /// let graph = Graph::new(3, vec![(0, 1), (1, 2)]).unwrap();
    /// assert_eq!(graph.edge_count(), 2);
    /// assert!(Graph::new(2, vec![(0, 2)]).is_err());
    /// ```
    pub fn new(node_count: usize, edges: Vec<(usize, usize)>) -> Result<Self> {
        check_bounds(node_count, &edges)?;
        Ok(Self { edges, node_count })
    }

    /// The graph with no nodes and no edges.
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            node_count: 0,
        }
    }

    // Generators build edges that are in range by construction.
    pub(crate) fn from_trusted(node_count: usize, edges: Vec<(usize, usize)>) -> Self {
        debug_assert!(edges.iter().all(|&(u, v)| u < node_count && v < node_count));
        Self { edges, node_count }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Checks bounds after deserialization, which bypasses [`Graph::new`].
    pub fn validate(&self) -> Result<()> {
        check_bounds(self.node_count, &self.edges)
    }
}

fn check_bounds(node_count: usize, edges: &[(usize, usize)]) -> Result<()> {
    match edges
        .iter()
        .find(|&&(u, v)| u >= node_count || v >= node_count)
    {
        Some(&(u, v)) => Err(CoreError::InvalidInput(format!(
            "edge ({u}, {v}) out of range for {node_count} nodes"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests;
