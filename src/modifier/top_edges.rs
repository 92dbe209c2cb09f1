//! Per-node top-k edge selection.

use std::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::debug;

use super::Modifier;
use crate::config::{ConfigSection, ConfigSource, ParamResolver};
use crate::model::weights::cmp_desc_absent_last;
use crate::model::{EdgeType, Graph, Sid};
use crate::Result;

/// For every node, keeps its `top_edges` highest-weighted incident edges of
/// one type. The result is the union over all nodes, so an edge survives if
/// either endpoint ranks it high enough.
///
/// Only edges carrying a weight for the type are candidates; an edge without
/// it is never kept. Ordering is descending by weight and ties keep the order
/// of the incoming edge collection. Surviving edges keep their incoming
/// relative order.
#[derive(Debug, Clone)]
pub struct TopEdgesFilter {
    name: &'static str,
    edge_type: EdgeType,
    top_edges: usize,
}

impl TopEdgesFilter {
    pub const SHORT_NAME: &'static str = "tef";

    pub fn new(edge_type: EdgeType, top_edges: usize) -> Self {
        Self { name: Self::SHORT_NAME, edge_type, top_edges }
    }

    pub fn from_config(explicit: &ConfigSection, source: &ConfigSource) -> Result<Self> {
        Self::from_params(Self::SHORT_NAME, &ParamResolver::new(Self::SHORT_NAME, explicit, source))
    }

    pub fn from_params(name: &'static str, params: &ParamResolver<'_>) -> Result<Self> {
        let filter = Self {
            name,
            edge_type: params.weight_kind("edge_type")?,
            top_edges: params.count("top_edges")?,
        };
        debug!(modifier = name, edge_type = %filter.edge_type, top_edges = filter.top_edges, "initialised");
        Ok(filter)
    }

    pub fn edge_type(&self) -> EdgeType {
        self.edge_type
    }

    pub fn top_edges(&self) -> usize {
        self.top_edges
    }
}

impl Modifier for TopEdgesFilter {
    fn short_name(&self) -> &'static str {
        self.name
    }

    fn modify(&self, graph: &Graph) -> Graph {
        let edges = graph.edges();

        // node → indices of incident edges weighted for the type, ascending
        let mut incident: HashMap<Sid, SmallVec<[usize; 8]>> = HashMap::new();
        for (i, edge) in edges.iter().enumerate() {
            if edge.weight(self.edge_type).is_none() {
                continue;
            }
            incident.entry(edge.src).or_default().push(i);
            if !edge.is_self_loop() {
                incident.entry(edge.tgt).or_default().push(i);
            }
        }

        let mut keep = vec![false; edges.len()];
        for (sid, _) in graph.nodes() {
            let Some(group) = incident.get_mut(&sid) else { continue };
            // stable: equal weights stay in edge-collection order
            group.sort_by(|&a, &b| {
                cmp_desc_absent_last(edges[a].weight(self.edge_type), edges[b].weight(self.edge_type))
            });
            for &i in group.iter().take(self.top_edges) {
                keep[i] = true;
            }
        }

        let out = graph.retain_marked(&keep);
        debug!(modifier = self.name, before = graph.edge_count(), after = out.edge_count(), "filtered");
        out
    }
}

impl fmt::Display for TopEdgesFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(edge_type={}, top_edges={})", self.name, self.edge_type, self.top_edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Comment, Edge, Split};
    use pretty_assertions::assert_eq;

    fn star(weights: &[f64]) -> Graph {
        // hub (0, 0) with one leaf comment per similarity weight
        let mut comments = vec![Comment::new("hub").with_split(Split::new("hub"))];
        comments.extend((0..weights.len()).map(|i| Comment::new(format!("leaf{i}")).with_split(Split::new("leaf"))));
        let edges = weights
            .iter()
            .enumerate()
            .map(|(i, w)| Edge::new((0, 0), (i + 1, 0)).with_weight(EdgeType::Similarity, *w));
        Graph::from_parts(comments, edges).unwrap()
    }

    fn targets(graph: &Graph) -> Vec<usize> {
        graph.edges().iter().map(|e| e.tgt.comment).collect()
    }

    #[test]
    fn test_leaf_endpoints_keep_their_only_edge() {
        // every leaf has a single edge, so with k >= 1 nothing is dropped
        let graph = star(&[0.1, 0.9, 0.5]);
        let out = TopEdgesFilter::new(EdgeType::Similarity, 1).modify(&graph);
        assert_eq!(out.edge_count(), 3);
    }

    #[test]
    fn test_k_zero_keeps_nothing() {
        let graph = star(&[0.1, 0.9]);
        let out = TopEdgesFilter::new(EdgeType::Similarity, 0).modify(&graph);
        assert_eq!(out.edge_count(), 0);
        assert_eq!(out.node_count(), 3);
    }

    /// Two hubs sharing leaves: each leaf sees both hubs.
    fn two_hubs() -> Graph {
        let comments = [
            Comment::new("a").with_split(Split::new("a")),
            Comment::new("b").with_split(Split::new("b")),
            Comment::new("c").with_splits([Split::new("c0"), Split::new("c1")]),
        ];
        Graph::from_parts(
            comments,
            [
                Edge::new((0, 0), (2, 0)).with_weight(EdgeType::Similarity, 0.2),
                Edge::new((0, 0), (2, 1)).with_weight(EdgeType::Similarity, 0.8),
                Edge::new((1, 0), (2, 0)).with_weight(EdgeType::Similarity, 0.6),
                Edge::new((1, 0), (2, 1)).with_weight(EdgeType::Similarity, 0.4),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_union_over_endpoints() {
        // a keeps 0.8, b keeps 0.6, c0 keeps 0.6, c1 keeps 0.8
        let out = TopEdgesFilter::new(EdgeType::Similarity, 1).modify(&two_hubs());
        let kept: Vec<f64> = out.edges().iter().filter_map(|e| e.weight(EdgeType::Similarity)).collect();
        assert_eq!(kept, vec![0.8, 0.6]);
    }

    #[test]
    fn test_ties_broken_by_edge_order() {
        let comments = [
            Comment::new("a").with_split(Split::new("a")),
            Comment::new("b").with_splits([Split::new("b0"), Split::new("b1"), Split::new("b2")]),
        ];
        let graph = Graph::from_parts(
            comments,
            [
                Edge::new((1, 0), (1, 1)).with_weight(EdgeType::Temporal, 9.0),
                Edge::new((0, 0), (1, 2)).with_weight(EdgeType::Temporal, 0.5),
                Edge::new((0, 0), (1, 1)).with_weight(EdgeType::Temporal, 0.5),
                Edge::new((0, 0), (1, 0)).with_weight(EdgeType::Temporal, 0.5),
                Edge::new((1, 0), (1, 2)).with_weight(EdgeType::Temporal, 9.0),
                Edge::new((1, 1), (1, 2)).with_weight(EdgeType::Temporal, 9.0),
            ],
        )
        .unwrap();
        // every b-split prefers its 9.0 edges, so only a's choice decides
        // which 0.5 edge survives: the first one in collection order
        let out = TopEdgesFilter::new(EdgeType::Temporal, 1).modify(&graph);
        let from_a: Vec<Sid> = out.edges().iter().filter(|e| e.src == Sid::new(0, 0)).map(|e| e.tgt).collect();
        assert_eq!(from_a, vec![Sid::new(1, 2)]);
    }

    #[test]
    fn test_unweighted_edges_are_not_candidates() {
        let comments = [
            Comment::new("a").with_split(Split::new("a")),
            Comment::new("b").with_splits([Split::new("b0"), Split::new("b1"), Split::new("b2")]),
        ];
        let graph = Graph::from_parts(
            comments,
            [
                // a–b0 has no similarity weight and comes first
                Edge::new((0, 0), (1, 0)).with_weight(EdgeType::ReplyTo, 1.0),
                Edge::new((0, 0), (1, 1)).with_weight(EdgeType::Similarity, -0.5),
                Edge::new((1, 0), (1, 2)).with_weight(EdgeType::Similarity, 0.1),
                Edge::new((1, 1), (1, 2)).with_weight(EdgeType::Similarity, 0.3),
            ],
        )
        .unwrap();
        let out = TopEdgesFilter::new(EdgeType::Similarity, 3).modify(&graph);
        // even with room for every incident edge, the reply-only edge is dropped
        assert!(out.edges().iter().all(|e| e.weight(EdgeType::Similarity).is_some()));
        assert_eq!(out.edge_count(), 3);
    }

    #[test]
    fn test_only_edge_without_weight_is_dropped() {
        let graph = Graph::from_parts(
            [
                Comment::new("a").with_split(Split::new("a")),
                Comment::new("b").with_split(Split::new("b")),
            ],
            [Edge::new((0, 0), (1, 0)).with_weight(EdgeType::ReplyTo, 1.0)],
        )
        .unwrap();
        let out = TopEdgesFilter::new(EdgeType::Similarity, 1).modify(&graph);
        assert_eq!(out.edge_count(), 0);
        assert_eq!(out.isolated_nodes(), vec![Sid::new(0, 0), Sid::new(1, 0)]);
    }

    #[test]
    fn test_self_loop_counted_once() {
        let graph = Graph::from_parts(
            [Comment::new("a").with_splits([Split::new("a0"), Split::new("a1")])],
            [
                Edge::new((0, 0), (0, 0)).with_weight(EdgeType::SameComment, 2.0),
                Edge::new((0, 0), (0, 1)).with_weight(EdgeType::SameComment, 1.0),
            ],
        )
        .unwrap();
        let out = TopEdgesFilter::new(EdgeType::SameComment, 1).modify(&graph);
        // (0,0) keeps its self-loop; (0,1) keeps its only edge
        assert_eq!(out.edge_count(), 2);
    }

    #[test]
    fn test_output_keeps_collection_order() {
        let graph = star(&[0.1, 0.9, 0.5]);
        let out = TopEdgesFilter::new(EdgeType::Similarity, 2).modify(&graph);
        assert_eq!(targets(&out), vec![1, 2, 3]);
    }
}
