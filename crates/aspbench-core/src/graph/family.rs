//! Structural graph families.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named graph-structure archetype selecting the generation algorithm.
///
/// Declaration order is the order families appear in graph library files and
/// in benchmark sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StructuralFamily {
    /// Row-major prefix of a complete graph.
    #[serde(rename = "dense-near-complete")]
    DenseNearComplete,
    /// Each candidate edge present with probability 1/4.
    #[serde(rename = "dense-random")]
    DenseRandom,
    /// Roughly `V^(5/4)` edges.
    #[serde(rename = "mid-random")]
    MidRandom,
    /// Two figure-eight components.
    #[serde(rename = "sparse-cycles")]
    SparseCycles,
    /// Two paths.
    #[serde(rename = "sparse-linear")]
    SparseLinear,
    /// `V = E/2` nodes.
    #[serde(rename = "sparse-random")]
    SparseRandom,
    /// Repeating triangle-plus-pair islands.
    #[serde(rename = "verysparse-islands")]
    VerySparseIslands,
    /// `V = 1.3 E` nodes.
    #[serde(rename = "verysparse-random")]
    VerySparseRandom,
}

impl StructuralFamily {
    pub const ALL: [StructuralFamily; 8] = [
        StructuralFamily::DenseNearComplete,
        StructuralFamily::DenseRandom,
        StructuralFamily::MidRandom,
        StructuralFamily::SparseCycles,
        StructuralFamily::SparseLinear,
        StructuralFamily::SparseRandom,
        StructuralFamily::VerySparseIslands,
        StructuralFamily::VerySparseRandom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DenseNearComplete => "dense-near-complete",
            Self::DenseRandom => "dense-random",
            Self::MidRandom => "mid-random",
            Self::SparseCycles => "sparse-cycles",
            Self::SparseLinear => "sparse-linear",
            Self::SparseRandom => "sparse-random",
            Self::VerySparseIslands => "verysparse-islands",
            Self::VerySparseRandom => "verysparse-random",
        }
    }

    /// Returns true if the edge count of a single draw is random.
    pub fn is_probabilistic(self) -> bool {
        matches!(
            self,
            Self::DenseRandom | Self::MidRandom | Self::SparseRandom | Self::VerySparseRandom
        )
    }
}

impl fmt::Display for StructuralFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructuralFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| format!("unknown graph family: {s}"))
    }
}
