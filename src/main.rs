//! lstop - Logstash Top
//!
//! A terminal dashboard for the flow metrics of a Logstash node.
//!
//! ## Usage
//!
//! ```bash
//! # Watch a local node
//! lstop
//!
//! # Watch a remote node, polling every 2 seconds
//! lstop --url http://logstash-1:9600 --interval-ms 2000
//!
//! # Give up after 5 failed startup attempts
//! lstop --startup-retries 5
//!
//! # With verbose logging to a custom directory
//! lstop -v --log-dir /tmp/lstop-logs
//! ```

use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use lstop_core::config::DEFAULT_BASE_URL;
use lstop_core::{DashboardConfig, LogGuard, init_logging};
use lstop_tui::{App, FAREWELL, RunOutcome, restore_terminal};
use tracing::{error, info};

/// Logstash Top
///
/// Polls the Logstash monitoring API and shows pipeline flow metrics as
/// live tables.
#[derive(Parser, Debug)]
#[command(name = "lstop")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the Logstash monitoring API
    #[arg(short, long, env = "LSTOP_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Milliseconds between polls
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,

    /// Give up after this many failed startup retries (default: retry forever)
    #[arg(long)]
    startup_retries: Option<u32>,

    /// Enable verbose logging (increases log level)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory for log files (defaults to ~/.lstop/logs/)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn dashboard_config(&self) -> lstop_core::Result<DashboardConfig> {
        let mut config = DashboardConfig::default()
            .with_base_url(&self.url)
            .with_poll_interval(Duration::from_millis(self.interval_ms))
            .with_request_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(retries) = self.startup_retries {
            config = config.with_startup_retries(retries);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.dashboard_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(hint) = e.guidance() {
                eprintln!("{hint}");
            }
            return ExitCode::from(2);
        }
    };

    // Initialize logging
    let _guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::from(1);
        }
    };

    // Install panic hook to ensure terminal cleanup
    install_panic_hook();

    info!(url = %config.base_url, interval_ms = cli.interval_ms, "starting lstop");

    let mut app = App::new(config);
    match app.run() {
        Ok(outcome) => {
            match outcome {
                RunOutcome::Quit => info!("lstop exited normally"),
                RunOutcome::StartupAborted => info!("lstop quit before the node answered"),
            }
            println!("{FAREWELL}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "lstop failed");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Install a panic hook that restores the terminal before printing the panic message.
fn install_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

/// Set up logging based on CLI arguments.
fn setup_logging(cli: &Cli) -> lstop_core::Result<LogGuard> {
    let debug = cli.verbose > 0;
    init_logging(cli.log_dir.clone(), debug)
}
