//! Core types for the aspbench harness.
//!
//! - [`graph`]: graphs, structural families and the exact-edge-count generator
//! - [`facts`]: the text and structured fact encodings
//! - [`instance`]: problem instances and the write-once instance cache
//! - [`library`]: pre-generated graph collections on disk
//!
//! # Example
//!
//! ```
//! use aspbench_core::{encode_graph, GraphEncoding, GraphGenerator, StructuralFamily};
//!
//! let mut generator = GraphGenerator::seeded(0xcafe);
//! let graph = generator.generate(StructuralFamily::DenseRandom, 32).unwrap();
//! assert_eq!(graph.edge_count(), 32);
//!
//! let encoded = encode_graph(&graph, &GraphEncoding::default());
//! assert_eq!(encoded.text.lines().count(), graph.node_count() + 32);
//! ```

pub mod error;
pub mod facts;
pub mod graph;
pub mod instance;
pub mod library;

pub use error::{CoreError, GenerationError, Result};
pub use facts::{decode_graph, encode_graph, parse_fact_text, EncodedFacts, Fact, FactSet, GraphEncoding};
pub use graph::{Graph, GraphGenerator, StructuralFamily, DEFAULT_MAX_ATTEMPTS};
pub use instance::{
    write_once, CacheStatus, InstanceData, InstanceFiles, InstanceKey, InstanceStore,
    ProblemInstance,
};
pub use library::{GraphLibrary, GraphSet, SizeRange};
