//! Configuration for the dashboard.
//!
//! There are no config files: values come from defaults and CLI flags.

use std::time::Duration;

use crate::error::{LstopError, Result};
use crate::recovery::RetryConfig;

/// Default monitoring API address of a local Logstash node.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9600";

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Base URL of the monitoring API, without trailing slash
    pub base_url: String,

    /// Time between polls of the pipeline stats endpoint
    pub poll_interval: Duration,

    /// Refresh interval while the help screen is shown
    pub help_refresh_interval: Duration,

    /// Timeout for a single HTTP request
    pub request_timeout: Duration,

    /// Retry pacing for the startup node overview fetch
    pub startup_retry: RetryConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(1),
            help_refresh_interval: Duration::from_millis(100),
            request_timeout: Duration::from_secs(5),
            startup_retry: RetryConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Use a different monitoring API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }

    /// Use a different poll interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Use a different per-request timeout.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Bound the number of startup retries.
    pub fn with_startup_retries(mut self, max_retries: u32) -> Self {
        self.startup_retry = self.startup_retry.with_max_retries(max_retries);
        self
    }

    /// Use a custom startup retry policy.
    pub fn with_startup_retry(mut self, startup_retry: RetryConfig) -> Self {
        self.startup_retry = startup_retry;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(LstopError::config_invalid("base_url", "must not be empty"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(LstopError::config_invalid(
                "base_url",
                format!("'{}' must start with http:// or https://", self.base_url),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(LstopError::config_invalid("poll_interval", "must be greater than zero"));
        }
        if self.help_refresh_interval.is_zero() {
            return Err(LstopError::config_invalid(
                "help_refresh_interval",
                "must be greater than zero",
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(LstopError::config_invalid("request_timeout", "must be greater than zero"));
        }
        Ok(())
    }
}

/// Trim whitespace and trailing slashes from a base URL.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DashboardConfig::default();
        assert_eq!(config.base_url, "http://localhost:9600");
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert!(config.help_refresh_interval < config.poll_interval);
        assert!(config.startup_retry.max_retries.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_base_url_is_normalized() {
        let config = DashboardConfig::default().with_base_url(" http://logstash:9600/ ");
        assert_eq!(config.base_url, "http://logstash:9600");
        assert_eq!(normalize_base_url("https://a//"), "https://a");
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = DashboardConfig::default()
            .with_base_url("localhost:9600")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_rejects_empty_url() {
        assert!(DashboardConfig::default().with_base_url("/").validate().is_err());
    }

    #[test]
    fn test_rejects_zero_intervals() {
        let err = DashboardConfig::default()
            .with_poll_interval(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("poll_interval"));

        let err = DashboardConfig::default()
            .with_request_timeout(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("request_timeout"));
    }

    #[test]
    fn test_startup_retries_opt_in_bound() {
        let config = DashboardConfig::default().with_startup_retries(5);
        assert_eq!(config.startup_retry.max_retries, Some(5));
    }
}
