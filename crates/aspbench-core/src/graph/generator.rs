//! Graph generation with an exact target edge count.
//!
//! Closed-form families build their edge set directly. Probabilistic families
//! draw an Erdős–Rényi graph whose expected edge count equals the target and
//! reject whole draws until one hits the target exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{Graph, StructuralFamily};
use crate::error::GenerationError;

/// Default cap on rejected draws for a single probabilistic graph.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100_000;

/// Generates graphs of a given family and exact edge count.
///
/// # Example
///
/// ```
/// use aspbench_core::{GraphGenerator, StructuralFamily};
///
/// let mut generator = GraphGenerator::seeded(7);
/// let graph = generator.generate(StructuralFamily::SparseLinear, 6).unwrap();
///
/// assert_eq!(graph.node_count(), 8);
/// assert_eq!(graph.edges(), &[(0, 1), (1, 2), (2, 3), (4, 5), (5, 6), (6, 7)]);
/// ```
#[derive(Debug, Clone)]
pub struct GraphGenerator<R = ChaCha8Rng> {
    rng: R,
    max_attempts: u32,
}

impl GraphGenerator<ChaCha8Rng> {
    /// Creates a generator with a reproducible random stream.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a generator seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(ChaCha8Rng::from_os_rng())
    }
}

impl<R: Rng> GraphGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the number of whole draws tried before giving up.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Generates a graph of `family` with exactly `target` edges.
    ///
    /// A target of zero yields the empty graph for every family.
    pub fn generate(
        &mut self,
        family: StructuralFamily,
        target: usize,
    ) -> Result<Graph, GenerationError> {
        if target == 0 {
            return Ok(Graph::empty());
        }

        match family {
            StructuralFamily::SparseLinear => Ok(sparse_linear(target)),
            StructuralFamily::SparseCycles => sparse_cycles(target),
            StructuralFamily::VerySparseIslands => islands(target),
            StructuralFamily::DenseNearComplete => near_complete(target),
            StructuralFamily::DenseRandom
            | StructuralFamily::MidRandom
            | StructuralFamily::SparseRandom
            | StructuralFamily::VerySparseRandom => {
                let (node_count, probability) = random_parameters(family, target)?;
                self.rejection_sample(family, target, node_count, probability)
            }
        }
    }

    fn rejection_sample(
        &mut self,
        family: StructuralFamily,
        target: usize,
        node_count: usize,
        probability: f64,
    ) -> Result<Graph, GenerationError> {
        for attempt in 1..=self.max_attempts {
            match draw_gnp(&mut self.rng, node_count, probability, target) {
                Some(edges) if edges.len() == target => {
                    tracing::debug!(
                        event = "generation_accepted",
                        family = family.as_str(),
                        target,
                        attempt
                    );
                    return Ok(Graph::from_trusted(node_count, edges));
                }
                drawn => {
                    tracing::debug!(
                        event = "generation_rejected",
                        family = family.as_str(),
                        target,
                        got = drawn.map(|e| e.len() as u64),
                    );
                }
            }
        }

        Err(GenerationError::AttemptsExhausted {
            family,
            target,
            attempts: self.max_attempts,
        })
    }
}

/// Node count and edge probability for the probabilistic families.
///
/// The pair is chosen so that `C(n, 2) * p` is close to `target`.
pub(crate) fn random_parameters(
    family: StructuralFamily,
    target: usize,
) -> Result<(usize, f64), GenerationError> {
    let t = target as f64;
    let (node_count, probability) = match family {
        StructuralFamily::VerySparseRandom => {
            ((t * 1.3).floor() as usize, 200.0 / (13.0 * (13.0 * t - 10.0)))
        }
        StructuralFamily::SparseRandom => (target / 2, 8.0 / (t - 2.0)),
        StructuralFamily::MidRandom => {
            let n = t.powf(0.8).floor() as usize;
            let nf = n as f64;
            (n, 2.0 * nf.powf(0.25) / (nf - 1.0))
        }
        StructuralFamily::DenseRandom => {
            let n = ((1.0 + (1.0 + 32.0 * t).sqrt()) / 2.0).ceil() as usize;
            (n, 0.25)
        }
        _ => {
            return Err(GenerationError::Internal {
                family,
                target,
                reason: "family is not probabilistic".to_string(),
            })
        }
    };

    if !(probability.is_finite() && probability > 0.0 && probability <= 1.0) {
        return Err(GenerationError::InvalidTarget {
            family,
            target,
            reason: format!("edge probability {probability} is outside (0, 1]"),
        });
    }
    if pair_count(node_count) < target {
        return Err(GenerationError::InvalidTarget {
            family,
            target,
            reason: format!("{node_count} nodes have fewer than {target} candidate edges"),
        });
    }

    Ok((node_count, probability))
}

fn pair_count(node_count: usize) -> usize {
    node_count * node_count.saturating_sub(1) / 2
}

/// Draws `G(n, p)` by skipping geometrically distributed runs of absent pairs.
///
/// Returns `None` as soon as the draw exceeds `limit` edges, since such a draw
/// is rejected anyway. Edges come out sorted row-major with `u < v`.
fn draw_gnp<R: Rng>(
    rng: &mut R,
    node_count: usize,
    probability: f64,
    limit: usize,
) -> Option<Vec<(usize, usize)>> {
    let mut edges = Vec::with_capacity(limit);
    if node_count < 2 {
        return Some(edges);
    }

    let log_absent = (1.0 - probability).ln();
    let max_skip = pair_count(node_count) as f64;
    // Pairs are enumerated column by column: (w, v) with w < v.
    let mut v: usize = 1;
    let mut w: i64 = -1;
    while v < node_count {
        let skip = if log_absent == f64::NEG_INFINITY {
            0
        } else {
            let r: f64 = rng.random();
            ((1.0 - r).ln() / log_absent).floor().min(max_skip) as i64
        };
        w += 1 + skip;
        while v < node_count && w >= v as i64 {
            w -= v as i64;
            v += 1;
        }
        if v < node_count {
            if edges.len() == limit {
                return None;
            }
            edges.push((w as usize, v));
        }
    }

    edges.sort_unstable();
    Some(edges)
}

/// Two paths split at the midpoint: `E + 2` nodes.
fn sparse_linear(target: usize) -> Graph {
    let midpoint = target / 2;
    let edges = (0..target)
        .map(|i| if i < midpoint { (i, i + 1) } else { (i + 1, i + 2) })
        .collect();
    Graph::from_trusted(target + 2, edges)
}

/// Two figure-eight components with `E - 2` nodes in total.
///
/// ```text
/// 0 - 1 - 2   6 - 7 - 8
/// |   |   |   |   |   |
/// 5 - 4 - 3   B - A - 9
/// ```
fn sparse_cycles(target: usize) -> Result<Graph, GenerationError> {
    let family = StructuralFamily::SparseCycles;
    if target % 2 != 0 {
        return Err(GenerationError::InvalidTarget {
            family,
            target,
            reason: "edge count must be even".to_string(),
        });
    }
    if target < 10 {
        return Err(GenerationError::InvalidTarget {
            family,
            target,
            reason: "edge count must be at least 10".to_string(),
        });
    }

    let component_nodes = target / 2 - 1;
    let mut edges = Vec::with_capacity(target);
    for component in 0..2 {
        let offset = component * component_nodes;
        edges.push((offset, offset + component_nodes - 1));
        for i in 0..component_nodes - 1 {
            edges.push((offset + i, offset + i + 1));
        }
        edges.push((
            offset + component_nodes / 4,
            offset + (3 * component_nodes) / 4,
        ));
    }

    Ok(Graph::from_trusted(target - 2, edges))
}

/// Repeats a triangle next to a single edge.
///
/// ```text
/// 0 - 1 - 2   3 - 4   5 - 6 - 7   8 - 9 ...
///  \_____/             \_____/
/// ```
fn islands(target: usize) -> Result<Graph, GenerationError> {
    if target % 4 != 0 {
        return Err(GenerationError::InvalidTarget {
            family: StructuralFamily::VerySparseIslands,
            target,
            reason: "edge count must be a multiple of 4".to_string(),
        });
    }

    let node_count = target / 4 * 5;
    let mut edges = Vec::with_capacity(target);
    for i in (0..node_count).step_by(5) {
        edges.extend([(i, i + 1), (i, i + 2), (i + 1, i + 2), (i + 3, i + 4)]);
    }
    Ok(Graph::from_trusted(node_count, edges))
}

/// The first `target` edges of the smallest complete graph that has enough.
fn near_complete(target: usize) -> Result<Graph, GenerationError> {
    let t = target as f64;
    let node_count = ((1.0 + (1.0 + 8.0 * t).sqrt()) / 2.0).ceil() as usize;

    let edges: Vec<(usize, usize)> = (0..node_count)
        .flat_map(|i| (i + 1..node_count).map(move |j| (i, j)))
        .take(target)
        .collect();

    if edges.len() != target {
        return Err(GenerationError::Internal {
            family: StructuralFamily::DenseNearComplete,
            target,
            reason: format!("complete graph on {node_count} nodes has too few edges"),
        });
    }
    Ok(Graph::from_trusted(node_count, edges))
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
