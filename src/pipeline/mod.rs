//! # Modifier Pipeline
//!
//! Applies an ordered list of modifiers to a graph. The pipeline does no
//! filtering of its own: it sequences the stages and records each stage's
//! configuration and resulting edge count.
//!
//! ```text
//! Graph → Modifier₁ → Modifier₂ → … → Modifierₙ → Graph
//! ```
//!
//! Order matters whenever stages do not commute: two edge-threshold stages
//! on different types commute, a top-k stage after a disjunctive threshold
//! stage generally keeps fewer edges than the reverse.

pub mod registry;

use std::sync::Arc;

use tracing::info;

use crate::config::{ConfigSection, ConfigSource};
use crate::model::Graph;
use crate::modifier::Modifier;
use crate::Result;

pub use registry::{lookup, ModifierKind, Preset, RegistryEntry, REGISTRY};

// ============================================================================
// Reports
// ============================================================================

/// Outcome of one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub modifier: &'static str,
    /// Resolved configuration, as displayed by the modifier.
    pub config: String,
    pub edges_before: usize,
    pub edges_after: usize,
}

impl StageReport {
    pub fn edges_removed(&self) -> usize {
        self.edges_before.saturating_sub(self.edges_after)
    }
}

/// Per-stage outcome of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub stages: Vec<StageReport>,
    pub edges_in: usize,
    pub edges_out: usize,
    /// Nodes left without any edge after the last stage.
    pub isolated_nodes: usize,
}

// ============================================================================
// Pipeline
// ============================================================================

/// An ordered list of configured modifiers.
///
/// Cloning is cheap: stages are shared, and since they are immutable the
/// same pipeline can run on independent graphs from several threads.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Modifier>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    pub fn with(mut self, modifier: impl Modifier + 'static) -> Self {
        self.stages.push(Arc::new(modifier));
        self
    }

    pub fn push(&mut self, modifier: Arc<dyn Modifier>) {
        self.stages.push(modifier);
    }

    /// Build every named stage from `source`. Fails on the first unknown name
    /// or unresolvable parameter, before any graph is touched.
    pub fn from_names<S: AsRef<str>>(
        names: impl IntoIterator<Item = S>,
        source: &ConfigSource,
    ) -> Result<Self> {
        let explicit = ConfigSection::new();
        let mut pipeline = Self::new();
        for name in names {
            let modifier = registry::lookup(name.as_ref())?.build(&explicit, source)?;
            pipeline.stages.push(Arc::from(modifier));
        }
        Ok(pipeline)
    }

    /// Build the stages listed in `source.pipeline`.
    pub fn from_source(source: &ConfigSource) -> Result<Self> {
        Self::from_names(&source.pipeline, source)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn modifiers(&self) -> impl Iterator<Item = &dyn Modifier> + '_ {
        self.stages.iter().map(|m| m.as_ref())
    }

    /// Run every stage in order.
    pub fn run(&self, graph: Graph) -> (Graph, PipelineReport) {
        let mut report = PipelineReport {
            edges_in: graph.edge_count(),
            ..PipelineReport::default()
        };

        let mut graph = graph;
        for (stage, modifier) in self.stages.iter().enumerate() {
            let edges_before = graph.edge_count();
            graph = modifier.modify(&graph);
            let edges_after = graph.edge_count();

            let config = modifier.to_string();
            info!(stage, modifier = modifier.short_name(), config = %config, edges_before, edges_after, "stage applied");
            report.stages.push(StageReport {
                modifier: modifier.short_name(),
                config,
                edges_before,
                edges_after,
            });
        }

        report.edges_out = graph.edge_count();
        report.isolated_nodes = graph.isolated_nodes().len();
        info!(
            stages = self.stages.len(),
            edges_in = report.edges_in,
            edges_out = report.edges_out,
            isolated_nodes = report.isolated_nodes,
            "pipeline finished"
        );
        (graph, report)
    }

    /// Run every stage, discarding the report.
    pub fn apply(&self, graph: Graph) -> Graph {
        self.run(graph).0
    }
}
