//! Scripted in-memory [`StatsSource`] for tests and offline demos.
//!
//! Responses are queued ahead of time and handed out in order. When a queue
//! runs dry the source answers with a connection error, like a node that
//! went away.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use lstop_core::types::{NodeOverview, PipelineAnswer};

use crate::error::{ClientError, Result};
use crate::source::StatsSource;

/// A [`StatsSource`] that replays queued results.
#[derive(Default)]
pub struct ScriptedSource {
    base_url: String,
    overviews: Mutex<VecDeque<Result<NodeOverview>>>,
    snapshots: Mutex<VecDeque<Result<PipelineAnswer>>>,
    overview_calls: AtomicUsize,
    snapshot_calls: AtomicUsize,
}

impl ScriptedSource {
    /// Create an empty script.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Queue a node overview result.
    pub fn push_overview(&self, result: Result<NodeOverview>) -> &Self {
        if let Ok(mut queue) = self.overviews.lock() {
            queue.push_back(result);
        }
        self
    }

    /// Queue a pipeline stats result.
    pub fn push_snapshot(&self, result: Result<PipelineAnswer>) -> &Self {
        if let Ok(mut queue) = self.snapshots.lock() {
            queue.push_back(result);
        }
        self
    }

    /// Number of node overview fetches made so far.
    pub fn overview_calls(&self) -> usize {
        self.overview_calls.load(Ordering::SeqCst)
    }

    /// Number of pipeline stats fetches made so far.
    pub fn snapshot_calls(&self) -> usize {
        self.snapshot_calls.load(Ordering::SeqCst)
    }

    fn next<T>(queue: &Mutex<VecDeque<Result<T>>>, what: &str) -> Result<T> {
        queue
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| Err(ClientError::ConnectionFailed(format!("no scripted {what}"))))
    }
}

#[async_trait]
impl StatsSource for ScriptedSource {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn node_overview(&self) -> Result<NodeOverview> {
        self.overview_calls.fetch_add(1, Ordering::SeqCst);
        Self::next(&self.overviews, "node overview")
    }

    async fn pipeline_stats(&self) -> Result<PipelineAnswer> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        Self::next(&self.snapshots, "pipeline stats")
    }
}
