//! Error types for the monitoring API client.

use thiserror::Error;

/// Monitoring API client errors.
///
/// None of these are fatal to the dashboard: a failed fetch is shown as a
/// warning line above the last good snapshot.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    ClientInit(String),

    /// The endpoint URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Connection failed (refused, DNS, reset)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request did not complete within the timeout
    #[error("Request timed out after {0}s: {1}")]
    Timeout(u64, String),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {endpoint}: {body}")]
    HttpStatus {
        status: u16,
        endpoint: String,
        body: String,
    },

    /// Response body was not the expected JSON
    #[error("Malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// Any other transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Check if retrying later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::ConnectionFailed(_) | ClientError::Timeout(_, _) => true,
            ClientError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            ClientError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Check if this error is a network-related error.
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            ClientError::ConnectionFailed(_) | ClientError::Timeout(_, _) | ClientError::Http(_)
        )
    }

    /// Classify a reqwest failure for the given endpoint.
    pub fn from_reqwest(err: reqwest::Error, endpoint: &str, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(timeout_secs, endpoint.to_string())
        } else if err.is_connect() {
            ClientError::ConnectionFailed(format!("{endpoint}: {err}"))
        } else if err.is_decode() {
            ClientError::Decode {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            }
        } else {
            ClientError::Http(err)
        }
    }

    /// Build an error for a non-success HTTP status.
    pub fn from_http_status(status: u16, endpoint: &str, body: &str) -> Self {
        ClientError::HttpStatus {
            status,
            endpoint: endpoint.to_string(),
            body: truncate_body(body),
        }
    }

    /// One-line message for the dashboard warning line.
    pub fn friendly_message(&self) -> String {
        match self {
            ClientError::ConnectionFailed(msg) => {
                format!("Connection failed: {msg}. Is Logstash running?")
            }
            ClientError::Timeout(secs, endpoint) => {
                format!("Request to {endpoint} timed out after {secs}s")
            }
            ClientError::HttpStatus { status, endpoint, .. } => {
                format!("{endpoint} answered HTTP {status}")
            }
            ClientError::Decode { endpoint, message } => {
                format!("Could not decode {endpoint}: {message}")
            }
            _ => self.to_string(),
        }
    }
}

/// Response bodies in errors are cut to keep the warning on one line.
fn truncate_body(body: &str) -> String {
    const MAX_BODY_CHARS: usize = 80;
    let single_line = body.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= MAX_BODY_CHARS {
        single_line
    } else {
        let mut cut: String = single_line.chars().take(MAX_BODY_CHARS).collect();
        cut.push('…');
        cut
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
