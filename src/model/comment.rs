//! Comments, their splits, and split identity.

use serde::{Deserialize, Serialize};

use super::{NodeWeightType, WeightMap};

/// Node identity: (comment index, split index).
///
/// The comment index is the position of the comment in the graph's comment
/// collection, not its external id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Sid {
    pub comment: usize,
    pub split: usize,
}

impl Sid {
    pub const fn new(comment: usize, split: usize) -> Self {
        Self { comment, split }
    }
}

impl From<(usize, usize)> for Sid {
    fn from((comment, split): (usize, usize)) -> Self {
        Self { comment, split }
    }
}

impl std::fmt::Display for Sid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.comment, self.split)
    }
}

/// One split of a comment's text. Acts as a graph node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub text: String,
    #[serde(default)]
    pub wgts: WeightMap<NodeWeightType>,
}

impl Split {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), wgts: WeightMap::new() }
    }

    pub fn with_weight(mut self, kind: NodeWeightType, weight: f64) -> Self {
        self.wgts.set(kind, weight);
        self
    }

    pub fn weight(&self, kind: NodeWeightType) -> Option<f64> {
        self.wgts.get(kind)
    }
}

/// A scraped comment with its ordered splits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// External identifier assigned by the source site.
    pub id: String,
    pub splits: Vec<Split>,
}

impl Comment {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), splits: Vec::new() }
    }

    pub fn with_split(mut self, split: Split) -> Self {
        self.splits.push(split);
        self
    }

    pub fn with_splits(mut self, splits: impl IntoIterator<Item = Split>) -> Self {
        self.splits.extend(splits);
        self
    }
}
