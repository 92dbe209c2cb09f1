//! Weight-threshold edge filters.
//!
//! Both filters share one comparison: an edge passes a type when it has a
//! weight for that type and the weight is strictly greater than the
//! threshold. An absent weight never passes.

use std::fmt;

use tracing::debug;

use super::Modifier;
use crate::config::{ConfigSection, ConfigSource, ParamResolver};
use crate::model::{Edge, EdgeType, Graph, WeightKind, WeightMap};
use crate::Result;

fn clears(edge: &Edge, edge_type: EdgeType, threshold: f64) -> bool {
    edge.weight(edge_type).is_some_and(|w| w > threshold)
}

// ============================================================================
// EdgeThresholdFilter
// ============================================================================

/// Keeps edges whose weight for one edge type exceeds a threshold.
#[derive(Debug, Clone)]
pub struct EdgeThresholdFilter {
    name: &'static str,
    edge_type: EdgeType,
    threshold: f64,
}

impl EdgeThresholdFilter {
    pub const SHORT_NAME: &'static str = "etf";

    pub fn new(edge_type: EdgeType, threshold: f64) -> Self {
        Self { name: Self::SHORT_NAME, edge_type, threshold }
    }

    /// Resolve `edge_type` and `threshold` under [`Self::SHORT_NAME`].
    pub fn from_config(explicit: &ConfigSection, source: &ConfigSource) -> Result<Self> {
        Self::from_params(Self::SHORT_NAME, &ParamResolver::new(Self::SHORT_NAME, explicit, source))
    }

    pub fn from_params(name: &'static str, params: &ParamResolver<'_>) -> Result<Self> {
        let filter = Self {
            name,
            edge_type: params.weight_kind("edge_type")?,
            threshold: params.float("threshold")?,
        };
        debug!(modifier = name, edge_type = %filter.edge_type, threshold = filter.threshold, "initialised");
        Ok(filter)
    }

    pub fn edge_type(&self) -> EdgeType {
        self.edge_type
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn keeps(&self, edge: &Edge) -> bool {
        clears(edge, self.edge_type, self.threshold)
    }
}

impl Modifier for EdgeThresholdFilter {
    fn short_name(&self) -> &'static str {
        self.name
    }

    fn modify(&self, graph: &Graph) -> Graph {
        let edges: Vec<Edge> = graph.edges().iter().filter(|e| self.keeps(e)).cloned().collect();
        debug!(modifier = self.name, before = graph.edge_count(), after = edges.len(), "filtered");
        graph.with_edges(edges)
    }
}

impl fmt::Display for EdgeThresholdFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(edge_type={}, threshold={})", self.name, self.edge_type, self.threshold)
    }
}

// ============================================================================
// DisjunctiveThresholdFilter
// ============================================================================

/// Keeps an edge if it clears the threshold of at least one edge type.
///
/// A type whose threshold is zero or negative is disabled: no edge passes
/// on that type alone. This is an OR over types; chaining several
/// [`EdgeThresholdFilter`]s would be an AND.
#[derive(Debug, Clone)]
pub struct DisjunctiveThresholdFilter {
    name: &'static str,
    thresholds: WeightMap<EdgeType>,
}

impl DisjunctiveThresholdFilter {
    pub const SHORT_NAME: &'static str = "mtf";

    /// Unlisted edge types are disabled.
    pub fn new(thresholds: impl IntoIterator<Item = (EdgeType, f64)>) -> Self {
        Self { name: Self::SHORT_NAME, thresholds: thresholds.into_iter().collect() }
    }

    /// Configuration key for one type's threshold, e.g. `reply_to_threshold`.
    pub fn parameter_name(edge_type: EdgeType) -> String {
        format!("{}_threshold", edge_type.name())
    }

    pub fn from_config(explicit: &ConfigSection, source: &ConfigSource) -> Result<Self> {
        Self::from_params(Self::SHORT_NAME, &ParamResolver::new(Self::SHORT_NAME, explicit, source))
    }

    /// Every `<type>_threshold` is optional and defaults to `0.0` (disabled).
    pub fn from_params(name: &'static str, params: &ParamResolver<'_>) -> Result<Self> {
        let mut thresholds = WeightMap::new();
        for &edge_type in EdgeType::ALL {
            thresholds.set(edge_type, params.float_or(&Self::parameter_name(edge_type), 0.0)?);
        }
        let filter = Self { name, thresholds };
        debug!(modifier = name, thresholds = %filter, "initialised");
        Ok(filter)
    }

    /// Configured threshold for `edge_type`; unlisted types read as `0.0`.
    pub fn threshold(&self, edge_type: EdgeType) -> f64 {
        self.thresholds.get(edge_type).unwrap_or(0.0)
    }

    pub fn keeps(&self, edge: &Edge) -> bool {
        self.thresholds
            .iter()
            .any(|(edge_type, threshold)| threshold > 0.0 && clears(edge, edge_type, threshold))
    }
}

impl Modifier for DisjunctiveThresholdFilter {
    fn short_name(&self) -> &'static str {
        self.name
    }

    fn modify(&self, graph: &Graph) -> Graph {
        let edges: Vec<Edge> = graph.edges().iter().filter(|e| self.keeps(e)).cloned().collect();
        debug!(modifier = self.name, before = graph.edge_count(), after = edges.len(), "filtered");
        graph.with_edges(edges)
    }
}

impl fmt::Display for DisjunctiveThresholdFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, &edge_type) in EdgeType::ALL.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{}={}", Self::parameter_name(edge_type), self.threshold(edge_type))?;
        }
        write!(f, ")")
    }
}
