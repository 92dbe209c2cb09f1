//! The comment graph: shared comment/split owner structure plus a flat
//! edge collection.
//!
//! Comments and their splits sit behind an `Arc` so a modifier can hand
//! back a new edge collection without copying any node.

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};

use super::{Comment, Edge, NodeWeightType, Sid, Split};
use crate::{Error, Result};

#[derive(Debug)]
struct Nodes {
    comments: Vec<Comment>,
    /// external comment id → comment index
    id2idx: HashMap<String, usize>,
}

/// A comment-interaction graph.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Arc<Nodes>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Build a graph from comments and edges, validating every endpoint.
    pub fn from_parts(
        comments: impl IntoIterator<Item = Comment>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Result<Self> {
        let mut builder = GraphBuilder::default();
        for comment in comments {
            builder.add_comment(comment)?;
        }
        for edge in edges {
            builder.add_edge(edge)?;
        }
        Ok(builder.build())
    }

    pub fn comments(&self) -> &[Comment] {
        &self.nodes.comments
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.comments.iter().map(|c| c.splits.len()).sum()
    }

    /// Comment index for an external comment id.
    pub fn comment_index(&self, id: &str) -> Option<usize> {
        self.nodes.id2idx.get(id).copied()
    }

    pub fn split(&self, sid: Sid) -> Option<&Split> {
        self.nodes.comments.get(sid.comment)?.splits.get(sid.split)
    }

    pub fn contains_node(&self, sid: Sid) -> bool {
        self.split(sid).is_some()
    }

    /// Weight of a node, `None` if the node or the weight is missing.
    pub fn node_weight(&self, sid: Sid, kind: NodeWeightType) -> Option<f64> {
        self.split(sid)?.weight(kind)
    }

    /// Every node in canonical order: comments in collection order, splits in
    /// comment order.
    pub fn nodes(&self) -> impl Iterator<Item = (Sid, &Split)> + '_ {
        self.nodes.comments.iter().enumerate().flat_map(|(c, comment)| {
            comment
                .splits
                .iter()
                .enumerate()
                .map(move |(s, split)| (Sid::new(c, s), split))
        })
    }

    /// Nodes with no incident edge left.
    pub fn isolated_nodes(&self) -> Vec<Sid> {
        let touched: HashSet<Sid> = self.edges.iter().flat_map(|e| [e.src, e.tgt]).collect();
        self.nodes()
            .map(|(sid, _)| sid)
            .filter(|sid| !touched.contains(sid))
            .collect()
    }

    /// Same nodes, new edge collection. Edges must be drawn from this graph;
    /// endpoints are not validated.
    pub(crate) fn with_edges(&self, edges: Vec<Edge>) -> Self {
        Self {
            nodes: Arc::clone(&self.nodes),
            edges,
        }
    }

    /// Keep the edges whose index in the current collection is marked in
    /// `keep`, preserving their relative order.
    pub(crate) fn retain_marked(&self, keep: &[bool]) -> Self {
        let edges = self
            .edges
            .iter()
            .zip(keep)
            .filter(|(_, k)| **k)
            .map(|(e, _)| e.clone())
            .collect();
        self.with_edges(edges)
    }

    /// Whether two graphs share the same comment/split storage.
    pub fn shares_nodes_with(&self, other: &Graph) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes)
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Incremental graph construction for upstream graph builders.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    comments: Vec<Comment>,
    id2idx: HashMap<String, usize>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    /// Append a comment; returns its comment index.
    pub fn add_comment(&mut self, comment: Comment) -> Result<usize> {
        if self.id2idx.contains_key(&comment.id) {
            return Err(Error::DuplicateComment(comment.id));
        }
        let idx = self.comments.len();
        self.id2idx.insert(comment.id.clone(), idx);
        self.comments.push(comment);
        Ok(idx)
    }

    pub fn comment(mut self, comment: Comment) -> Result<Self> {
        self.add_comment(comment)?;
        Ok(self)
    }

    /// Append an edge. Both endpoints must already exist.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        for endpoint in [edge.src, edge.tgt] {
            let exists = self
                .comments
                .get(endpoint.comment)
                .is_some_and(|c| endpoint.split < c.splits.len());
            if !exists {
                return Err(Error::DanglingEdge {
                    edge: self.edges.len(),
                    endpoint,
                });
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn edge(mut self, edge: Edge) -> Result<Self> {
        self.add_edge(edge)?;
        Ok(self)
    }

    pub fn build(self) -> Graph {
        Graph {
            nodes: Arc::new(Nodes {
                comments: self.comments,
                id2idx: self.id2idx,
            }),
            edges: self.edges,
        }
    }
}
