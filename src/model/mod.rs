//! # Comment Graph Model
//!
//! Plain data that every modifier consumes and returns:
//! comments → splits (nodes) and typed, weighted edges between splits.
//!
//! Design rule: this module is pure data. Weights are computed upstream
//! and never changed here.

pub mod comment;
pub mod edge;
pub mod graph;
pub mod weights;

pub use comment::{Comment, Sid, Split};
pub use edge::Edge;
pub use graph::{Graph, GraphBuilder};
pub use weights::{EdgeType, NodeWeightType, WeightKind, WeightMap};
