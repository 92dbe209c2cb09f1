//! Typed, weighted edge between two splits.

use serde::{Deserialize, Serialize};

use super::{EdgeType, Sid, WeightMap};

/// An edge between two splits.
///
/// An edge can be scored for several relations at once; `wgts` holds one
/// entry per relation that was actually scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub src: Sid,
    pub tgt: Sid,
    #[serde(default)]
    pub wgts: WeightMap<EdgeType>,
}

impl Edge {
    pub fn new(src: impl Into<Sid>, tgt: impl Into<Sid>) -> Self {
        Self {
            src: src.into(),
            tgt: tgt.into(),
            wgts: WeightMap::new(),
        }
    }

    pub fn with_weight(mut self, kind: EdgeType, weight: f64) -> Self {
        self.wgts.set(kind, weight);
        self
    }

    pub fn weight(&self, kind: EdgeType) -> Option<f64> {
        self.wgts.get(kind)
    }

    pub fn is_self_loop(&self) -> bool {
        self.src == self.tgt
    }

    /// The "other" end of the edge from the given split.
    pub fn other_node(&self, from: Sid) -> Option<Sid> {
        if from == self.src { Some(self.tgt) }
        else if from == self.tgt { Some(self.src) }
        else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_node() {
        let edge = Edge::new((0, 1), (2, 0));
        assert_eq!(edge.other_node(Sid::new(0, 1)), Some(Sid::new(2, 0)));
        assert_eq!(edge.other_node(Sid::new(2, 0)), Some(Sid::new(0, 1)));
        assert_eq!(edge.other_node(Sid::new(1, 1)), None);
        assert!(!edge.is_self_loop());
    }

    #[test]
    fn test_unscored_relation_reads_absent() {
        let edge = Edge::new((0, 0), (0, 1))
            .with_weight(EdgeType::SameComment, 1.0)
            .with_weight(EdgeType::Temporal, 0.0);
        assert_eq!(edge.weight(EdgeType::SameComment), Some(1.0));
        assert_eq!(edge.weight(EdgeType::Temporal), Some(0.0));
        assert_eq!(edge.weight(EdgeType::Similarity), None);
    }

    #[test]
    fn test_deserialize_without_weights() {
        let edge: Edge = serde_json::from_str(
            r#"{"src": {"comment": 0, "split": 0}, "tgt": {"comment": 1, "split": 2}}"#,
        )
        .unwrap();
        assert_eq!(edge.tgt, Sid::new(1, 2));
        assert!(edge.wgts.is_empty());
    }
}
