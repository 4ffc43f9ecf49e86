//! Terminal UI for lstop.
//!
//! This crate provides the ratatui-based dashboard over a Logstash node's
//! monitoring API.
//!
//! ## Features
//!
//! - Overview table of all pipelines with a total row
//! - Per-pipeline detail with input, filter and output tables
//! - Trend deltas colored against rolling windows
//! - Last good data kept on screen when a fetch fails
//!
//! ## Hotkeys
//!
//! - `up` / `k`, `down` / `j` - Select pipeline
//! - `enter` - Pipeline detail
//! - `b` or `Esc` - Back to overview
//! - `w` - Cycle worker metric
//! - `p` - Pause/resume polling
//! - `h` or `?` - Help
//! - `q` - Quit

pub mod app;
pub mod dashboard;
pub mod event;
pub mod input;
pub mod nav;
pub mod render;
pub mod roster;
pub mod theme;

pub use app::{App, AppResult, FAREWELL, restore_terminal};
pub use dashboard::{Dashboard, RunOutcome};
pub use event::NavEvent;
pub use nav::NavigationState;
