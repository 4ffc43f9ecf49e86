//! Dashboard Controller.
//!
//! Owns the navigation state, the pipeline roster and the last good snapshot.
//! Each cycle it fetches (unless paused or showing help), composes the
//! screen, repaints only when the text changed, then sleeps until the next
//! poll or the next key event, whichever comes first. A key that changes the
//! view is repainted from the held snapshot before the next fetch starts.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use lstop_client::{ClientError, StatsSource};
use lstop_core::{Backoff, DashboardConfig, NodeOverview, PipelineAnswer};
use ratatui::backend::Backend;
use ratatui::text::Text;
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::app::AppResult;
use crate::event::NavEvent;
use crate::nav::NavigationState;
use crate::render::{Renderer, Screen};
use crate::theme::Palette;
use crate::roster::PipelineRoster;

/// How a run ended. Both are clean exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Quit from the dashboard
    Quit,
    /// Quit while still waiting for the node to answer
    StartupAborted,
}

/// The poll/render state machine.
pub struct Dashboard {
    source: Arc<dyn StatsSource>,
    config: DashboardConfig,
    renderer: Renderer,
    node: NodeOverview,
    nav: NavigationState,
    roster: PipelineRoster,
    /// Most recent successful snapshot and when it arrived
    last_good: Option<(PipelineAnswer, DateTime<Local>)>,
    /// Set by a failed fetch, cleared by the next success
    warning: Option<String>,
    last_screen: Option<Text<'static>>,
}

impl Dashboard {
    pub fn new(source: Arc<dyn StatsSource>, config: DashboardConfig) -> Self {
        Self {
            source,
            config,
            renderer: Renderer::new(Palette::default()),
            node: NodeOverview::default(),
            nav: NavigationState::new(),
            roster: PipelineRoster::new(),
            last_good: None,
            warning: None,
            last_screen: None,
        }
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn roster(&self) -> &PipelineRoster {
        &self.roster
    }

    /// Replace the node overview used for the title and detail header.
    pub fn set_node(&mut self, node: NodeOverview) {
        self.node = node;
    }

    /// Apply a key event. Returns `true` if the screen must be repainted.
    ///
    /// [`NavEvent::Redraw`] forgets the last painted screen so the next
    /// compose is painted even when its text is unchanged.
    pub fn handle_event(&mut self, event: NavEvent) -> bool {
        if event == NavEvent::Redraw {
            self.last_screen = None;
            return true;
        }
        let changed = self.nav.apply(event, self.roster.len());
        if changed {
            debug!(event = ?event, nav = ?self.nav, "navigation changed");
        }
        changed
    }

    /// Sleep before the next cycle; shorter while help is shown.
    pub fn cycle_delay(&self) -> Duration {
        if self.nav.help {
            self.config.help_refresh_interval
        } else {
            self.config.poll_interval
        }
    }

    /// Run one cycle without waiting.
    ///
    /// Returns the new screen, or `None` if it is identical to the last one
    /// and no repaint is needed.
    pub async fn tick(&mut self) -> Option<Text<'static>> {
        if !self.nav.help && !self.nav.paused {
            self.refresh().await;
        }
        self.redraw()
    }

    /// Compose from the held snapshot without fetching.
    ///
    /// Returns `None` when the screen is identical to the last one painted.
    pub fn redraw(&mut self) -> Option<Text<'static>> {
        let screen = self.compose();
        if self.last_screen.as_ref() == Some(&screen) {
            return None;
        }
        self.last_screen = Some(screen.clone());
        Some(screen)
    }

    /// Compose the screen from the current state without fetching.
    pub fn compose(&self) -> Text<'static> {
        let empty = PipelineAnswer::default();
        let answer = self.last_good.as_ref().map_or(&empty, |(answer, _)| answer);
        self.renderer.compose(&Screen {
            node: &self.node,
            answer,
            roster: self.roster.names(),
            nav: &self.nav,
            base_url: self.source.base_url(),
            warning: self.warning.as_deref(),
        })
    }

    async fn refresh(&mut self) {
        match self.source.pipeline_stats().await {
            Ok(answer) => {
                if self.roster.sync(&answer) {
                    info!(pipelines = ?self.roster.names(), "pipeline roster changed");
                }
                self.nav.clamp(self.roster.len());
                self.last_good = Some((answer, Local::now()));
                self.warning = None;
            }
            Err(e) => {
                warn!(url = %self.source.base_url(), error = %e, "pipeline stats fetch failed");
                self.warning = Some(self.warning_for(&e));
            }
        }
    }

    fn warning_for(&self, error: &ClientError) -> String {
        match &self.last_good {
            Some((_, at)) => format!(
                "{} (showing data from {})",
                error.friendly_message(),
                at.format("%H:%M:%S")
            ),
            None => format!("{} (no data received yet)", error.friendly_message()),
        }
    }

    /// Drive the dashboard until quit.
    ///
    /// Blocks on the node overview first, retrying per the startup policy.
    /// An exhausted retry bound is the only error path besides terminal I/O.
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut UnboundedReceiver<NavEvent>,
    ) -> AppResult<RunOutcome> {
        if !self.wait_for_node(terminal, events).await? {
            info!("quit during startup");
            return Ok(RunOutcome::StartupAborted);
        }

        loop {
            if let Some(screen) = self.tick().await {
                paint(terminal, &screen)?;
            }

            let mut changed = false;
            tokio::select! {
                _ = sleep(self.cycle_delay()) => {}
                event = events.recv() => match event {
                    Some(event) => {
                        changed |= self.handle_event(event);
                        while let Ok(event) = events.try_recv() {
                            changed |= self.handle_event(event);
                        }
                    }
                    None => {
                        warn!("input channel closed, quitting");
                        self.nav.quit = true;
                    }
                }
            }

            if self.nav.quit {
                info!("quit requested");
                return Ok(RunOutcome::Quit);
            }
            if changed {
                if let Some(screen) = self.redraw() {
                    paint(terminal, &screen)?;
                }
            }
        }
    }

    /// Fetch the node overview, retrying with backoff.
    ///
    /// Returns `false` if the user quit while waiting.
    async fn wait_for_node<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut UnboundedReceiver<NavEvent>,
    ) -> AppResult<bool> {
        let mut backoff = Backoff::new(self.config.startup_retry.clone());
        let mut attempt: u32 = 0;

        loop {
            attempt = attempt.saturating_add(1);
            let error = match self.source.node_overview().await {
                Ok(node) => {
                    info!(
                        url = %self.source.base_url(),
                        host = %node.host,
                        version = %node.version,
                        attempt,
                        "connected to node"
                    );
                    self.node = node;
                    return Ok(true);
                }
                Err(e) => e,
            };

            warn!(url = %self.source.base_url(), attempt, error = %error, "node overview unavailable");
            let Some(delay) = backoff.next_delay() else {
                return Err(error.into());
            };

            let waiting = self
                .renderer
                .waiting(self.source.base_url(), attempt, &error.friendly_message());
            paint(terminal, &waiting)?;

            let timer = sleep(delay);
            tokio::pin!(timer);
            loop {
                tokio::select! {
                    _ = &mut timer => break,
                    event = events.recv() => match event {
                        Some(NavEvent::Quit) | None => return Ok(false),
                        Some(other) => debug!(event = ?other, "ignoring key during startup"),
                    }
                }
            }
        }
    }
}

fn paint<B: Backend>(terminal: &mut Terminal<B>, text: &Text<'static>) -> AppResult<()> {
    terminal.draw(|frame| frame.render_widget(Paragraph::new(text.clone()), frame.area()))?;
    Ok(())
}
