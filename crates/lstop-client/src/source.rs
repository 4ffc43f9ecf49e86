//! The seam between the dashboard and wherever snapshots come from.

use async_trait::async_trait;
use lstop_core::types::{NodeOverview, PipelineAnswer};

use crate::error::Result;

/// A source of node overviews and pipeline snapshots.
///
/// Implementations must be safe to call repeatedly; the dashboard calls
/// [`StatsSource::pipeline_stats`] once per poll cycle and never
/// concurrently with itself.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Base URL shown in the dashboard header.
    fn base_url(&self) -> &str;

    /// Fetch node identity and pipeline configuration (`GET /_node`).
    async fn node_overview(&self) -> Result<NodeOverview>;

    /// Fetch a fresh pipeline stats snapshot (`GET /_node/stats/pipelines`).
    async fn pipeline_stats(&self) -> Result<PipelineAnswer>;
}
