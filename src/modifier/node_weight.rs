//! Node-weight threshold filter with strict/relaxed edge retention.

use std::fmt;

use hashbrown::HashSet;
use tracing::debug;

use super::{retain_by_membership, Membership, Modifier};
use crate::config::{ConfigSection, ConfigSource, ParamResolver};
use crate::model::{Graph, NodeWeightType, Sid};
use crate::Result;

/// Keeps edges whose endpoints belong to the set of nodes clearing a
/// node-weight threshold.
///
/// The node comparator depends on the mode: strict qualifies nodes with
/// `weight >= threshold` and keeps an edge only if both endpoints qualify;
/// relaxed qualifies nodes with `weight > threshold` and keeps an edge if
/// either endpoint does. Nodes without the weight never qualify.
///
/// Strict output is contained in relaxed output except at the boundary: an
/// edge whose endpoints both weigh exactly `threshold` is kept by strict and
/// dropped by relaxed.
#[derive(Debug, Clone)]
pub struct NodeWeightFilter {
    name: &'static str,
    weight_type: NodeWeightType,
    threshold: f64,
    membership: Membership,
}

impl NodeWeightFilter {
    pub const SHORT_NAME: &'static str = "nwf";

    pub fn new(weight_type: NodeWeightType, threshold: f64, membership: Membership) -> Self {
        Self { name: Self::SHORT_NAME, weight_type, threshold, membership }
    }

    pub fn strict(weight_type: NodeWeightType, threshold: f64) -> Self {
        Self::new(weight_type, threshold, Membership::Strict)
    }

    pub fn relaxed(weight_type: NodeWeightType, threshold: f64) -> Self {
        Self::new(weight_type, threshold, Membership::Relaxed)
    }

    pub fn from_config(explicit: &ConfigSection, source: &ConfigSource) -> Result<Self> {
        Self::from_params(Self::SHORT_NAME, &ParamResolver::new(Self::SHORT_NAME, explicit, source))
    }

    /// Resolves `node_weight_type`, `threshold` and `strict`.
    pub fn from_params(name: &'static str, params: &ParamResolver<'_>) -> Result<Self> {
        let filter = Self {
            name,
            weight_type: params.weight_kind("node_weight_type")?,
            threshold: params.float("threshold")?,
            membership: Membership::from_strict(params.boolean("strict")?),
        };
        debug!(
            modifier = name,
            node_weight_type = %filter.weight_type,
            threshold = filter.threshold,
            membership = %filter.membership,
            "initialised"
        );
        Ok(filter)
    }

    pub fn weight_type(&self) -> NodeWeightType {
        self.weight_type
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn membership(&self) -> Membership {
        self.membership
    }

    fn qualifies(&self, weight: f64) -> bool {
        match self.membership {
            Membership::Strict => weight >= self.threshold,
            Membership::Relaxed => weight > self.threshold,
        }
    }

    /// Nodes that clear the threshold under this filter's comparator.
    pub fn qualifying_nodes(&self, graph: &Graph) -> HashSet<Sid> {
        graph
            .nodes()
            .filter(|(_, split)| split.weight(self.weight_type).is_some_and(|w| self.qualifies(w)))
            .map(|(sid, _)| sid)
            .collect()
    }
}

impl Modifier for NodeWeightFilter {
    fn short_name(&self) -> &'static str {
        self.name
    }

    fn modify(&self, graph: &Graph) -> Graph {
        let qualifying = self.qualifying_nodes(graph);
        let out = retain_by_membership(graph, &qualifying, self.membership);
        debug!(
            modifier = self.name,
            qualifying = qualifying.len(),
            before = graph.edge_count(),
            after = out.edge_count(),
            "filtered"
        );
        out
    }
}

impl fmt::Display for NodeWeightFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(node_weight_type={}, threshold={}, mode={})",
            self.name, self.weight_type, self.threshold, self.membership
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::section;
    use crate::model::{Comment, Edge, EdgeType, Split};
    use crate::Error;
    use pretty_assertions::assert_eq;

    /// Path a–b–c–d with VOTES {a: 5, b: 3, c: absent, d: 1}.
    fn path() -> Graph {
        let split = |votes: Option<f64>| match votes {
            Some(v) => Split::new("s").with_weight(NodeWeightType::Votes, v),
            None => Split::new("s"),
        };
        Graph::from_parts(
            [
                Comment::new("a").with_split(split(Some(5.0))),
                Comment::new("b").with_split(split(Some(3.0))),
                Comment::new("c").with_split(split(None)),
                Comment::new("d").with_split(split(Some(1.0))),
            ],
            [
                Edge::new((0, 0), (1, 0)).with_weight(EdgeType::ReplyTo, 1.0),
                Edge::new((1, 0), (2, 0)).with_weight(EdgeType::ReplyTo, 1.0),
                Edge::new((2, 0), (3, 0)).with_weight(EdgeType::ReplyTo, 1.0),
            ],
        )
        .unwrap()
    }

    fn pairs(graph: &Graph) -> Vec<(usize, usize)> {
        graph.edges().iter().map(|e| (e.src.comment, e.tgt.comment)).collect()
    }

    #[test]
    fn test_strict_requires_both_endpoints() {
        let out = NodeWeightFilter::strict(NodeWeightType::Votes, 3.0).modify(&path());
        assert_eq!(pairs(&out), vec![(0, 1)]);
    }

    #[test]
    fn test_relaxed_requires_one_endpoint() {
        let out = NodeWeightFilter::relaxed(NodeWeightType::Votes, 3.0).modify(&path());
        // b does not qualify at equality under relaxed; a still does
        assert_eq!(pairs(&out), vec![(0, 1)]);

        let out = NodeWeightFilter::relaxed(NodeWeightType::Votes, 0.5).modify(&path());
        assert_eq!(pairs(&out), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_comparator_differs_at_boundary() {
        let graph = path();
        let strict = NodeWeightFilter::strict(NodeWeightType::Votes, 1.0).qualifying_nodes(&graph);
        let relaxed = NodeWeightFilter::relaxed(NodeWeightType::Votes, 1.0).qualifying_nodes(&graph);
        assert!(strict.contains(&Sid::new(3, 0)));
        assert!(!relaxed.contains(&Sid::new(3, 0)));
    }

    #[test]
    fn test_boundary_pair_kept_by_strict_only() {
        let graph = Graph::from_parts(
            [
                Comment::new("a").with_split(Split::new("a").with_weight(NodeWeightType::Votes, 3.0)),
                Comment::new("b").with_split(Split::new("b").with_weight(NodeWeightType::Votes, 3.0)),
            ],
            [Edge::new((0, 0), (1, 0)).with_weight(EdgeType::ReplyTo, 1.0)],
        )
        .unwrap();
        let strict = NodeWeightFilter::strict(NodeWeightType::Votes, 3.0).modify(&graph);
        let relaxed = NodeWeightFilter::relaxed(NodeWeightType::Votes, 3.0).modify(&graph);
        assert_eq!(strict.edge_count(), 1);
        assert_eq!(relaxed.edge_count(), 0);
    }

    #[test]
    fn test_absent_weight_never_qualifies() {
        let graph = path();
        let qualifying = NodeWeightFilter::strict(NodeWeightType::Votes, f64::MIN).qualifying_nodes(&graph);
        assert_eq!(qualifying.len(), 3);
        assert!(!qualifying.contains(&Sid::new(2, 0)));
    }

    #[test]
    fn test_from_config_needs_mode() {
        let explicit = section([("node_weight_type", "votes")]);
        let source = ConfigSource::new().with_param("nwf", "threshold", 2.0);
        let err = NodeWeightFilter::from_config(&explicit, &source).unwrap_err();
        assert!(matches!(err, Error::Configuration { parameter, .. } if parameter == "strict"));

        let source = source.with_param("nwf", "strict", false);
        let filter = NodeWeightFilter::from_config(&explicit, &source).unwrap();
        assert_eq!(filter.membership(), Membership::Relaxed);
        assert_eq!(filter.to_string(), "nwf(node_weight_type=votes, threshold=2, mode=relaxed)");
    }
}
