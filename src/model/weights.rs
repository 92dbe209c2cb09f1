//! Weight type enumerations and the flat per-type weight map.
//!
//! Edges and splits both carry a small map from a closed set of weight
//! types to scalar values. A type that was never scored is absent, which
//! is distinct from a stored `0.0`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Error, Result};

/// Closed enumeration of weight identifiers.
pub trait WeightKind: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Human-readable family name used in error messages.
    const KIND: &'static str;

    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// Stable snake_case identifier used in configuration.
    fn name(self) -> &'static str;

    /// Parse a configuration identifier (case-insensitive).
    fn parse(name: &str) -> Result<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == normalized)
            .ok_or_else(|| Error::UnknownWeightType {
                kind: Self::KIND,
                name: name.to_owned(),
            })
    }
}

// ============================================================================
// Edge types
// ============================================================================

/// Relation an edge weight was scored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    ReplyTo,
    Similarity,
    SameComment,
    SameArticle,
    SameGroup,
    Temporal,
}

impl WeightKind for EdgeType {
    const KIND: &'static str = "edge type";

    const ALL: &'static [Self] = &[
        EdgeType::ReplyTo,
        EdgeType::Similarity,
        EdgeType::SameComment,
        EdgeType::SameArticle,
        EdgeType::SameGroup,
        EdgeType::Temporal,
    ];

    fn name(self) -> &'static str {
        match self {
            EdgeType::ReplyTo => "reply_to",
            EdgeType::Similarity => "similarity",
            EdgeType::SameComment => "same_comment",
            EdgeType::SameArticle => "same_article",
            EdgeType::SameGroup => "same_group",
            EdgeType::Temporal => "temporal",
        }
    }
}

// ============================================================================
// Node weight types
// ============================================================================

/// Scalar attached to a split (node) by upstream scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeWeightType {
    Size,
    PageRank,
    DegreeCentrality,
    Recency,
    Votes,
    Toxicity,
}

impl WeightKind for NodeWeightType {
    const KIND: &'static str = "node weight type";

    const ALL: &'static [Self] = &[
        NodeWeightType::Size,
        NodeWeightType::PageRank,
        NodeWeightType::DegreeCentrality,
        NodeWeightType::Recency,
        NodeWeightType::Votes,
        NodeWeightType::Toxicity,
    ];

    fn name(self) -> &'static str {
        match self {
            NodeWeightType::Size => "size",
            NodeWeightType::PageRank => "pagerank",
            NodeWeightType::DegreeCentrality => "degree_centrality",
            NodeWeightType::Recency => "recency",
            NodeWeightType::Votes => "votes",
            NodeWeightType::Toxicity => "toxicity",
        }
    }
}

macro_rules! weight_kind_str_impls {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                <$ty as WeightKind>::parse(s)
            }
        }
    )*};
}

weight_kind_str_impls!(EdgeType, NodeWeightType);

// ============================================================================
// WeightMap
// ============================================================================

/// Flat map from weight type to value. At most one entry per type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightMap<K> {
    entries: SmallVec<[(K, f64); 6]>,
}

impl<K> Default for WeightMap<K> {
    fn default() -> Self {
        Self { entries: SmallVec::new() }
    }
}

impl<K: WeightKind> WeightMap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight for `kind`, or `None` if it was never scored.
    pub fn get(&self, kind: K) -> Option<f64> {
        self.entries.iter().find(|(k, _)| *k == kind).map(|&(_, w)| w)
    }

    pub fn contains(&self, kind: K) -> bool {
        self.entries.iter().any(|(k, _)| *k == kind)
    }

    /// Insert or replace the weight for `kind`. Returns the previous value.
    pub fn set(&mut self, kind: K, weight: f64) -> Option<f64> {
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some(slot) => Some(std::mem::replace(&mut slot.1, weight)),
            None => {
                self.entries.push((kind, weight));
                None
            }
        }
    }

    pub fn with(mut self, kind: K, weight: f64) -> Self {
        self.set(kind, weight);
        self
    }

    pub fn remove(&mut self, kind: K) -> Option<f64> {
        let pos = self.entries.iter().position(|(k, _)| *k == kind)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: WeightKind> FromIterator<(K, f64)> for WeightMap<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, w) in iter {
            map.set(k, w);
        }
        map
    }
}

/// Descending order with absent weights below every present one.
///
/// Returns the ordering of `a` relative to `b` for a descending sort, so it
/// can be passed straight to `sort_by`.
pub(crate) fn cmp_desc_absent_last(a: Option<f64>, b: Option<f64>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
