//! Logging infrastructure for lstop.
//!
//! Structured logging via the `tracing` ecosystem. The dashboard owns the
//! terminal, so everything goes to a JSON-lines file instead of stderr.
//!
//! ## Example
//!
//! ```no_run
//! use lstop_core::logging;
//!
//! // Initialize logging (call once at startup)
//! let _guard = logging::init_logging(None, false).expect("logging init");
//!
//! tracing::info!("lstop started");
//! tracing::debug!(url = "http://localhost:9600", "fetching pipeline stats");
//! ```

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::{LstopError, Result};

/// Log file name prefix inside the log directory.
pub const LOG_FILE_NAME: &str = "lstop.log";

/// Crate targets enabled by the default filter.
const LOG_TARGETS: [&str; 4] = ["lstop", "lstop_core", "lstop_client", "lstop_tui"];

/// Guard that must be held to ensure log flushing on shutdown.
///
/// Keep this guard alive for the lifetime of the application.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the lstop logging system.
///
/// Logs are written as JSON lines to a daily rolling file in `log_dir`
/// (default `~/.lstop/logs/`). `RUST_LOG` overrides the level; otherwise
/// `verbose` selects DEBUG over INFO.
pub fn init_logging(log_dir: Option<PathBuf>, verbose: bool) -> Result<LogGuard> {
    let log_dir = prepare_log_dir(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            LOG_TARGETS
                .iter()
                .map(|target| format!("{target}={default_level}"))
                .collect::<Vec<_>>()
                .join(","),
        )
    });

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::debug!(log_dir = %log_dir.display(), verbose, "logging initialized");

    Ok(LogGuard {
        _file_guard: Some(file_guard),
    })
}

/// Resolve the log directory and make sure it exists.
pub fn prepare_log_dir(log_dir: Option<PathBuf>) -> Result<PathBuf> {
    let log_dir = match log_dir {
        Some(dir) => dir,
        None => default_log_dir()?,
    };

    std::fs::create_dir_all(&log_dir).map_err(|e| LstopError::DirectoryCreation {
        path: log_dir.clone(),
        source: e,
    })?;

    Ok(log_dir)
}

/// Initialize minimal console-only logging for testing.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Get the default log directory path.
///
/// Returns `~/.lstop/logs/`
pub fn default_log_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(LstopError::HomeDirUnavailable)?;
    Ok(home.join(".lstop").join("logs"))
}
