//! Event handling for the lstop TUI.
//!
//! Maps raw key presses to navigation events. The mapping is stateless; all
//! state lives in [`crate::nav::NavigationState`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Navigation events posted by the input listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// Request application quit (`q`, Ctrl+C)
    Quit,
    /// Select the next pipeline
    Down,
    /// Select the previous pipeline
    Up,
    /// Open the detail view of the selected pipeline
    Enter,
    /// Return to the overview
    Back,
    /// Toggle polling
    TogglePause,
    /// Toggle the help screen
    ToggleHelp,
    /// Cycle the worker metric shown for filters and outputs
    CycleMetric,
    /// Terminal was resized; repaint even if the text is unchanged
    Redraw,
}

/// Input handler for converting key events to navigation events.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputHandler;

impl InputHandler {
    /// Create a new input handler.
    pub fn new() -> Self {
        Self
    }

    /// Handle a key event and return the corresponding navigation event.
    ///
    /// Key releases and repeats are ignored so each press acts once.
    pub fn handle_key(&self, key: KeyEvent) -> Option<NavEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        // Ctrl+C always quits; raw mode delivers it as a key
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => Some(NavEvent::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(NavEvent::Quit),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(NavEvent::Down),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(NavEvent::Up),
            KeyCode::Enter => Some(NavEvent::Enter),
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => Some(NavEvent::Back),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(NavEvent::TogglePause),
            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
                Some(NavEvent::ToggleHelp)
            }
            KeyCode::Char('w') | KeyCode::Char('W') => Some(NavEvent::CycleMetric),
            _ => None,
        }
    }
}
