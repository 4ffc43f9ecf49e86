//! Error types for lstop operations.
//!
//! [`LstopError`] covers failures outside the polling path: bad
//! configuration, log directory setup and terminal handling. Fetch failures
//! live in `lstop-client` and never terminate the dashboard.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`LstopError`].
pub type Result<T> = std::result::Result<T, LstopError>;

/// Error type for lstop setup and terminal operations.
#[derive(Debug, Error)]
pub enum LstopError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A configuration value failed validation
    #[error("Invalid configuration for {field}: {message}")]
    ConfigInvalid { field: String, message: String },

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// Directory creation failed
    #[error("Failed to create directory: {path}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No home directory to derive default paths from
    #[error("Could not determine home directory")]
    HomeDirUnavailable,

    // =========================================================================
    // TUI Errors
    // =========================================================================
    /// Terminal initialization failed
    #[error("Terminal initialization failed: {message}")]
    TerminalInit { message: String },

    /// Terminal restore failed
    #[error("Failed to restore terminal: {message}")]
    TerminalRestore { message: String },

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Internal error (bug in lstop)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl LstopError {
    /// Create a ConfigInvalid error
    pub fn config_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error is fatal (should exit application)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::TerminalInit { .. } | Self::Internal { .. } | Self::ConfigInvalid { .. }
        )
    }

    /// Returns actionable guidance for the user
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            Self::ConfigInvalid { .. } => {
                Some("Pass a base URL such as --url http://localhost:9600 and non-zero intervals")
            }
            Self::DirectoryCreation { .. } | Self::HomeDirUnavailable => {
                Some("Choose a writable log directory with --log-dir")
            }
            Self::TerminalInit { .. } => Some("Try running in a different terminal"),
            _ => None,
        }
    }
}
