//! # Modifier Trait
//!
//! A modifier is a named, fully configured graph → graph transform. Every
//! modifier in this crate is a filter: it returns a graph over the same
//! comments and splits whose edge collection is a subset of the input's.
//!
//! ## Implementations
//!
//! | Modifier | Module | Keeps an edge when |
//! |----------|--------|--------------------|
//! | `EdgeThresholdFilter` | `threshold` | its weight for one type exceeds a threshold |
//! | `DisjunctiveThresholdFilter` | `threshold` | any enabled type clears its own threshold |
//! | `TopEdgesFilter` | `top_edges` | it is among the top-k of either endpoint |
//! | `NodeWeightFilter` | `node_weight` | its endpoints clear a node-weight threshold |
//! | `RankFilter` | `rank` | its endpoints are among the k best-ranked nodes |

pub mod threshold;
pub mod top_edges;
pub mod node_weight;
pub mod rank;

use std::fmt;

use hashbrown::HashSet;

use crate::model::{Graph, Sid};

pub use threshold::{DisjunctiveThresholdFilter, EdgeThresholdFilter};
pub use top_edges::TopEdgesFilter;
pub use node_weight::NodeWeightFilter;
pub use rank::{MissingRank, RankFilter};

// ============================================================================
// Modifier trait
// ============================================================================

/// A configured graph → graph transform.
///
/// Parameters are bound at construction and never change afterwards, so a
/// modifier can be shared across threads that each filter their own graph.
pub trait Modifier: fmt::Debug + fmt::Display + Send + Sync {
    /// Short name this instance was registered under (e.g. `"sef"`).
    fn short_name(&self) -> &'static str;

    /// Produce the filtered graph. The input graph is left untouched and the
    /// result shares its comment/split storage.
    fn modify(&self, graph: &Graph) -> Graph;
}

// ============================================================================
// Endpoint membership rule
// ============================================================================

/// How an edge's endpoints must relate to a qualifying node set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Membership {
    /// Both endpoints must qualify.
    Strict,
    /// At least one endpoint must qualify.
    Relaxed,
}

impl Membership {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Membership::Strict } else { Membership::Relaxed }
    }

    pub fn is_strict(self) -> bool {
        self == Membership::Strict
    }

    pub fn admits(self, src_qualifies: bool, tgt_qualifies: bool) -> bool {
        match self {
            Membership::Strict => src_qualifies && tgt_qualifies,
            Membership::Relaxed => src_qualifies || tgt_qualifies,
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Membership::Strict => "strict",
            Membership::Relaxed => "relaxed",
        })
    }
}

/// Keep the edges whose endpoints satisfy `membership` against `qualifying`.
pub(crate) fn retain_by_membership(
    graph: &Graph,
    qualifying: &HashSet<Sid>,
    membership: Membership,
) -> Graph {
    let edges = graph
        .edges()
        .iter()
        .filter(|e| membership.admits(qualifying.contains(&e.src), qualifying.contains(&e.tgt)))
        .cloned()
        .collect();
    graph.with_edges(edges)
}
