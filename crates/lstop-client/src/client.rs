//! Monitoring API client using direct HTTP requests.
//!
//! [`StatsClient`] fetches the two fixed endpoints of the Logstash
//! monitoring API with reqwest and decodes them into `lstop-core` records.
//! Requests are fetch-only and safe to repeat at any cadence.
//!
//! ## Example
//!
//! ```no_run
//! use lstop_client::{StatsClient, StatsSource};
//! use std::time::Duration;
//!
//! # async fn example() -> lstop_client::Result<()> {
//! let client = StatsClient::new("http://localhost:9600", Duration::from_secs(5))?;
//! let answer = client.pipeline_stats().await?;
//! println!("{} pipelines", answer.pipelines.len());
//! # Ok(())
//! # }
//! ```

use std::time::{Duration, Instant};

use async_trait::async_trait;
use lstop_core::config::normalize_base_url;
use lstop_core::types::{NodeOverview, PipelineAnswer};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::source::StatsSource;

/// Path of the node overview endpoint.
pub const NODE_PATH: &str = "/_node";

/// Path of the pipeline stats endpoint.
pub const PIPELINE_STATS_PATH: &str = "/_node/stats/pipelines";

/// HTTP client for one Logstash node.
pub struct StatsClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl StatsClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url.as_ref());
        reqwest::Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::ClientInit(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Full URL of an endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET an endpoint and decode its JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint_url(path);
        let timeout_secs = self.timeout.as_secs();
        let start = Instant::now();

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, path, timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_http_status(status.as_u16(), path, &body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(e, path, timeout_secs))?;

        let decoded = serde_json::from_slice(&body).map_err(|e| ClientError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })?;

        debug!(
            url = %url,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "fetched endpoint"
        );

        Ok(decoded)
    }
}

#[async_trait]
impl StatsSource for StatsClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn node_overview(&self) -> Result<NodeOverview> {
        self.get_json(NODE_PATH).await
    }

    async fn pipeline_stats(&self) -> Result<PipelineAnswer> {
        self.get_json(PIPELINE_STATS_PATH).await
    }
}
