//! # lstop-core
//!
//! Core types, errors, and utilities shared by the lstop crates.
//!
//! This crate provides:
//! - [`LstopError`] - Error type for configuration, logging and terminal failures
//! - [`logging`] - Tracing setup writing JSON lines to `~/.lstop/logs/`
//! - [`types`] - Records decoded from the Logstash monitoring API
//! - [`trend`] - Deltas between a flow's current value and its rolling windows
//! - [`recovery`] - Jittered exponential backoff for the startup gate
//! - [`config`] - Dashboard configuration
//!
//! ## Example
//!
//! ```
//! use lstop_core::types::FlowSeries;
//! use lstop_core::trend::{Trend, TrendLevel};
//!
//! let flow = FlowSeries {
//!     current: 1.0,
//!     last_1_minute: 1.05,
//!     lifetime: 0.85,
//!     ..FlowSeries::default()
//! };
//! let trend = Trend::of(&flow);
//! assert_eq!(TrendLevel::classify(trend.vs_lifetime), TrendLevel::Positive);
//! assert_eq!(TrendLevel::classify(trend.vs_1_minute), TrendLevel::Neutral);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod recovery;
pub mod trend;
pub mod types;

// Re-export main types for convenience
pub use config::DashboardConfig;
pub use error::{LstopError, Result};
pub use logging::{LogGuard, init_logging};
pub use recovery::{Backoff, RetryConfig};
pub use trend::{Trend, TrendLevel};
pub use types::{FlowSeries, NodeOverview, PipelineAnswer, PipelineData, WorkerMetric};
