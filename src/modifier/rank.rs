//! Rank-based top-k node selection.

use std::fmt;

use hashbrown::HashSet;
use tracing::debug;

use super::{retain_by_membership, Membership, Modifier};
use crate::config::{ConfigSection, ConfigSource, ParamResolver};
use crate::model::{Graph, NodeWeightType, Sid};
use crate::Result;

/// What to do with nodes that carry no rank score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MissingRank {
    /// Leave the node out of the ranking entirely.
    #[default]
    Exclude,
    /// Rank the node as if its score were `0.0`.
    Zero,
}

impl MissingRank {
    pub fn name(self) -> &'static str {
        match self {
            MissingRank::Exclude => "exclude",
            MissingRank::Zero => "zero",
        }
    }
}

impl fmt::Display for MissingRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keeps edges attached to the `k` best-ranked nodes.
///
/// Nodes are ranked by a precomputed score (PAGERANK unless configured
/// otherwise), descending, ties in canonical node order. The top `k` form
/// the qualifying set; `strict` keeps edges between two qualifying nodes,
/// relaxed keeps edges touching at least one. Fewer than `k` scored nodes
/// simply yields a smaller set.
#[derive(Debug, Clone)]
pub struct RankFilter {
    name: &'static str,
    k: usize,
    membership: Membership,
    rank_by: NodeWeightType,
    missing: MissingRank,
}

impl RankFilter {
    pub const SHORT_NAME: &'static str = "prf";

    /// PageRank-ranked filter; unranked nodes are excluded.
    pub fn new(k: usize, strict: bool) -> Self {
        Self {
            name: Self::SHORT_NAME,
            k,
            membership: Membership::from_strict(strict),
            rank_by: NodeWeightType::PageRank,
            missing: MissingRank::Exclude,
        }
    }

    pub fn rank_by(mut self, weight_type: NodeWeightType) -> Self {
        self.rank_by = weight_type;
        self
    }

    pub fn missing_rank(mut self, missing: MissingRank) -> Self {
        self.missing = missing;
        self
    }

    pub fn from_config(explicit: &ConfigSection, source: &ConfigSource) -> Result<Self> {
        Self::from_params(Self::SHORT_NAME, &ParamResolver::new(Self::SHORT_NAME, explicit, source))
    }

    /// Resolves `k` and `strict`, plus the optional `node_weight_type`
    /// (default `pagerank`) and `missing_rank` (`exclude` or `zero`).
    pub fn from_params(name: &'static str, params: &ParamResolver<'_>) -> Result<Self> {
        let missing = match params.string_or("missing_rank", MissingRank::Exclude.name())? {
            "exclude" => MissingRank::Exclude,
            "zero" => MissingRank::Zero,
            other => return Err(params.invalid("missing_rank", "\"exclude\" or \"zero\"", other)),
        };
        let filter = Self {
            name,
            k: params.count("k")?,
            membership: Membership::from_strict(params.boolean("strict")?),
            rank_by: params.weight_kind_or("node_weight_type", NodeWeightType::PageRank)?,
            missing,
        };
        debug!(modifier = name, config = %filter, "initialised");
        Ok(filter)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn membership(&self) -> Membership {
        self.membership
    }

    /// Scored nodes in rank order, best first.
    pub fn ranking(&self, graph: &Graph) -> Vec<(Sid, f64)> {
        let mut ranked: Vec<(Sid, f64)> = graph
            .nodes()
            .filter_map(|(sid, split)| match (split.weight(self.rank_by), self.missing) {
                (Some(score), _) => Some((sid, score)),
                (None, MissingRank::Zero) => Some((sid, 0.0)),
                (None, MissingRank::Exclude) => None,
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// The at most `k` best-ranked nodes.
    pub fn qualifying_nodes(&self, graph: &Graph) -> HashSet<Sid> {
        self.ranking(graph).into_iter().take(self.k).map(|(sid, _)| sid).collect()
    }
}

impl Modifier for RankFilter {
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

impl fmt::Display for RankFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(k={}, strict={}, node_weight_type={}, missing_rank={})",
            self.name,
            self.k,
            self.membership.is_strict(),
            self.rank_by,
            self.missing
        )
    }
}
