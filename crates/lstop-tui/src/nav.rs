//! Navigation state machine.
//!
//! [`NavigationState`] is owned by the controller and changed only through
//! [`NavigationState::apply`]. The listener thread just posts events.

use lstop_core::WorkerMetric;

use crate::event::NavEvent;

/// Orthogonal view flags plus the selected pipeline index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Index into the pipeline roster; always `< len` unless the roster is empty
    pub selected_index: usize,
    /// Detail view of the selected pipeline is active
    pub selected: bool,
    /// Help screen is shown instead of data
    pub help: bool,
    /// Polling is suspended
    pub paused: bool,
    /// Terminal state; the loop exits
    pub quit: bool,
    /// Worker metric shown in the filter and output tables
    pub metric: WorkerMetric,
}

impl NavigationState {
    /// Create the initial state: overview, first pipeline, polling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one navigation event given the current number of pipelines.
    ///
    /// Returns `true` if any field changed. Events after quit are ignored.
    pub fn apply(&mut self, event: NavEvent, pipeline_count: usize) -> bool {
        if self.quit {
            return false;
        }
        let before = *self;

        match event {
            NavEvent::Quit => self.quit = true,
            NavEvent::Down => {
                if pipeline_count > 0 {
                    self.selected_index = (self.selected_index + 1) % pipeline_count;
                }
            }
            NavEvent::Up => {
                if pipeline_count > 0 {
                    self.selected_index =
                        (self.selected_index + pipeline_count - 1) % pipeline_count;
                }
            }
            NavEvent::Enter => {
                if pipeline_count > 0 {
                    self.selected = true;
                }
            }
            NavEvent::Back => self.selected = false,
            NavEvent::TogglePause => self.paused = !self.paused,
            NavEvent::ToggleHelp => self.help = !self.help,
            NavEvent::CycleMetric => self.metric = self.metric.next(),
            NavEvent::Redraw => {}
        }

        *self != before
    }

    /// Keep the selection valid after the roster changed size.
    ///
    /// An empty roster resets the index and leaves the detail view.
    pub fn clamp(&mut self, pipeline_count: usize) {
        if pipeline_count == 0 {
            self.selected_index = 0;
            self.selected = false;
        } else if self.selected_index >= pipeline_count {
            self.selected_index = pipeline_count - 1;
        }
    }
}
