//! # comment-graph — Edge Filters for Comment-Interaction Graphs
//!
//! Reduces a weighted comment graph to a smaller, high-signal subgraph by
//! running an ordered pipeline of configurable modifiers. Weights are
//! computed upstream; modifiers only decide which edges survive.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `Modifier` is the contract between pipeline and filters
//! 2. **Clean DTOs**: `Graph`, `Comment`, `Split`, `Edge` cross all boundaries
//! 3. **Fail fast**: every parameter is resolved and validated at construction
//! 4. **Nodes are shared**: a modifier returns a new edge collection over the
//!    same comment/split storage
//!
//! ## Quick Start
//!
//! ```rust
//! use comment_graph::{Comment, ConfigSource, Edge, EdgeType, Graph, Pipeline, Split};
//!
//! # fn example() -> comment_graph::Result<()> {
//! let graph = Graph::from_parts(
//!     [
//!         Comment::new("c1").with_split(Split::new("first")),
//!         Comment::new("c2").with_split(Split::new("second")),
//!     ],
//!     [Edge::new((0, 0), (1, 0)).with_weight(EdgeType::Similarity, 0.9)],
//! )?;
//!
//! let source = ConfigSource::new()
//!     .with_pipeline(["sef"])
//!     .with_param("sef", "threshold", 0.6);
//! let pipeline = Pipeline::from_source(&source)?;
//! let (filtered, report) = pipeline.run(graph);
//!
//! assert_eq!(filtered.edge_count(), 1);
//! assert_eq!(report.stages.len(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Modifiers
//!
//! | Short name | Modifier | Preset |
//! |------------|----------|--------|
//! | `etf` | `EdgeThresholdFilter` | |
//! | `sef` | `EdgeThresholdFilter` | `edge_type = similarity` |
//! | `mtf` | `DisjunctiveThresholdFilter` | |
//! | `tef` | `TopEdgesFilter` | |
//! | `brtef` | `TopEdgesFilter` | `edge_type = reply_to` |
//! | `bsef` | `TopEdgesFilter` | `edge_type = similarity` |
//! | `nwf` | `NodeWeightFilter` | |
//! | `snwf` | `NodeWeightFilter` | `strict = true` |
//! | `rnwf` | `NodeWeightFilter` | `strict = false` |
//! | `prf` | `RankFilter` | |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod config;
pub mod modifier;
pub mod pipeline;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Comment, Split, Sid, Edge, Graph, GraphBuilder,
    EdgeType, NodeWeightType, WeightKind, WeightMap,
};

// ============================================================================
// Re-exports: Configuration
// ============================================================================

pub use config::{ConfigSection, ConfigSource, ConfigValue, ParamResolver, section};

// ============================================================================
// Re-exports: Modifiers and Pipeline
// ============================================================================

pub use modifier::{
    Modifier, Membership, MissingRank,
    EdgeThresholdFilter, DisjunctiveThresholdFilter, TopEdgesFilter,
    NodeWeightFilter, RankFilter,
};
pub use pipeline::{Pipeline, PipelineReport, StageReport, ModifierKind, RegistryEntry, REGISTRY};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: modifier '{modifier}' requires parameter '{parameter}'")]
    Configuration { modifier: String, parameter: String },

    #[error("Invalid parameter '{parameter}' for modifier '{modifier}': expected {expected}, got {got}")]
    InvalidParameter {
        modifier: String,
        parameter: String,
        expected: &'static str,
        got: String,
    },

    #[error("Unknown {kind}: '{name}'")]
    UnknownWeightType { kind: &'static str, name: String },

    #[error("Unknown modifier: '{0}'")]
    UnknownModifier(String),

    #[error("Edge {edge} references missing node {endpoint}")]
    DanglingEdge { edge: usize, endpoint: Sid },

    #[error("Duplicate comment id: '{0}'")]
    DuplicateComment(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
