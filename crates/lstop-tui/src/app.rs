//! Terminal lifecycle for the lstop TUI.
//!
//! `App` puts the terminal into raw mode on the alternate screen, starts the
//! input listener, drives the [`Dashboard`] on a single-threaded runtime and
//! restores the terminal however the run ends.

use std::io::{self, Write};
use std::sync::Arc;

use lstop_client::{StatsClient, StatsSource};
use lstop_core::{DashboardConfig, LstopError};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tracing::info;

use crate::dashboard::{Dashboard, RunOutcome};
use crate::input::{CrosstermKeys, InputListener};

/// Result type for app operations.
pub type AppResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Line printed to the shell once the dashboard has exited.
pub const FAREWELL: &str = "Bye from Logstash Top";

/// Main application.
pub struct App {
    config: DashboardConfig,
}

impl App {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Run the dashboard until the user quits.
    pub fn run(&mut self) -> AppResult<RunOutcome> {
        let source: Arc<dyn StatsSource> = Arc::new(StatsClient::new(
            &self.config.base_url,
            self.config.request_timeout,
        )?);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LstopError::internal(format!("cannot start runtime: {e}")))?;

        // Setup terminal
        crossterm::terminal::enable_raw_mode().map_err(|e| LstopError::TerminalInit {
            message: format!("cannot enable raw mode: {e}"),
        })?;
        let mut stdout = io::stdout();
        if let Err(e) = crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen) {
            let _ = restore_terminal();
            return Err(LstopError::TerminalInit {
                message: format!("cannot enter alternate screen: {e}"),
            }
            .into());
        }

        let result = self.run_in_terminal(&runtime, source);

        restore_terminal().map_err(|e| LstopError::TerminalRestore {
            message: e.to_string(),
        })?;
        result
    }

    fn run_in_terminal(
        &self,
        runtime: &tokio::runtime::Runtime,
        source: Arc<dyn StatsSource>,
    ) -> AppResult<RunOutcome> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let listener = InputListener::spawn(CrosstermKeys, tx)?;
        info!(url = %self.config.base_url, "dashboard started");

        let mut dashboard = Dashboard::new(source, self.config.clone());
        let result = runtime.block_on(dashboard.run(&mut terminal, &mut rx));

        listener.stop();
        result
    }
}

/// Restore terminal to its normal state.
///
/// Safe to call more than once; used on normal exit and from the panic hook.
pub fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();

    let _ = crossterm::terminal::disable_raw_mode();
    crossterm::execute!(
        stdout,
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    stdout.flush()
}
