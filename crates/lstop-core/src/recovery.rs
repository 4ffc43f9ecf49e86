//! Retry pacing for the startup gate.
//!
//! The node overview must be fetched before the dashboard can render, so
//! startup retries with jittered exponential backoff until it succeeds.
//! Retries are unbounded unless a caller opts into a limit.
//!
//! ## Example
//!
//! ```
//! use lstop_core::recovery::{Backoff, RetryConfig};
//! use std::time::Duration;
//!
//! let config = RetryConfig {
//!     max_retries: Some(2),
//!     initial_delay: Duration::from_millis(100),
//!     max_delay: Duration::from_secs(1),
//!     multiplier: 2.0,
//! };
//!
//! let mut backoff = Backoff::new(config);
//! assert!(backoff.next_delay().is_some());
//! assert!(backoff.next_delay().is_some());
//! assert!(backoff.next_delay().is_none());
//! ```

use std::time::Duration;

use rand::Rng;
use tracing::debug;

/// Configuration for retry behavior with exponential backoff.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retries; `None` retries forever.
    pub max_retries: Option<u32>,
    /// Initial delay before first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries (caps exponential growth).
    pub max_delay: Duration,
    /// Multiplier for exponential backoff (e.g., 2.0 doubles each time).
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: None,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Cap the number of retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Delay before retry number `attempt` (zero-based), without jitter.
    pub fn base_delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let base_delay = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        Duration::from_secs_f64(base_delay.min(self.max_delay.as_secs_f64()).max(0.0))
    }

    /// Calculate delay for a given attempt number with ±25% jitter.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let capped_delay = self.base_delay_for_attempt(attempt).as_secs_f64();

        let jitter_range = capped_delay * 0.25;
        if jitter_range <= 0.0 {
            return Duration::from_secs_f64(capped_delay);
        }
        let mut rng = rand::rng();
        let jitter = rng.random_range(-jitter_range..jitter_range);
        let final_delay = (capped_delay + jitter)
            .max(0.0)
            .min(self.max_delay.as_secs_f64());

        Duration::from_secs_f64(final_delay)
    }

    /// Whether `retries` retries have used up the budget.
    pub fn is_exhausted(&self, retries: u32) -> bool {
        self.max_retries.is_some_and(|max| retries >= max)
    }
}

/// Stateful retry pacing over a [`RetryConfig`].
#[derive(Debug, Clone)]
pub struct Backoff {
    config: RetryConfig,
    retries: u32,
}

impl Backoff {
    /// Start a fresh backoff sequence.
    pub fn new(config: RetryConfig) -> Self {
        Self { config, retries: 0 }
    }

    /// Number of retries handed out so far.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Delay before the next retry, or `None` once the budget is spent.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.config.is_exhausted(self.retries) {
            return None;
        }
        let delay = self.config.delay_for_attempt(self.retries);
        self.retries = self.retries.saturating_add(1);
        debug!(
            retry = self.retries,
            delay_ms = delay.as_millis() as u64,
            "scheduling retry with backoff"
        );
        Some(delay)
    }
}
