//! # lstop-client
//!
//! Snapshot fetching for the lstop dashboard.
//!
//! This crate provides:
//! - [`StatsSource`] - The trait the dashboard polls through
//! - [`StatsClient`] - reqwest implementation against a live Logstash node
//! - [`ScriptedSource`] - Replays queued results, for tests and demos
//! - [`ClientError`] - Transport, status and decode failures
//!
//! ## Endpoints
//!
//! - `GET {base}/_node` - node identity and per-pipeline configuration
//! - `GET {base}/_node/stats/pipelines` - live pipeline statistics

pub mod client;
pub mod error;
pub mod mock;
pub mod source;

// Re-export main types
pub use client::{NODE_PATH, PIPELINE_STATS_PATH, StatsClient};
pub use error::{ClientError, Result};
pub use mock::ScriptedSource;
pub use source::StatsSource;
