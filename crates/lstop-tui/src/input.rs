//! Input Listener.
//!
//! A dedicated thread blocks on terminal events and posts the mapped
//! [`NavEvent`]s to the controller over a channel. Resizes are posted as
//! [`NavEvent::Redraw`]. The listener never touches navigation state itself.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::event::{InputHandler, NavEvent};

/// How long a single poll for terminal input blocks before the stop flag is
/// checked again.
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A blocking source of terminal events.
pub trait KeySource: Send + 'static {
    /// Wait up to `timeout` for the next terminal event.
    ///
    /// `Ok(None)` means nothing arrived in time. An error ends the listener.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Reads events from the real terminal through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        event::read().map(Some)
    }
}

/// Handle to a running listener thread.
pub struct InputListener {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputListener {
    /// Spawn the listener thread.
    ///
    /// The thread exits on its own after posting [`NavEvent::Quit`], when the
    /// receiving side is dropped, or when [`InputListener::stop`] is called.
    pub fn spawn<S: KeySource>(source: S, tx: UnboundedSender<NavEvent>) -> io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("lstop-input".into())
            .spawn(move || listen(source, tx, flag))?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Whether the thread has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Signal the thread to stop and wait for it.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("input listener thread panicked");
            }
        }
    }
}

impl Drop for InputListener {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn listen<S: KeySource>(mut source: S, tx: UnboundedSender<NavEvent>, stop: Arc<AtomicBool>) {
    let handler = InputHandler::new();

    while !stop.load(Ordering::SeqCst) {
        let nav = match source.next_event(INPUT_POLL_INTERVAL) {
            Ok(Some(Event::Key(key))) => handler.handle_key(key),
            Ok(Some(Event::Resize(..))) => Some(NavEvent::Redraw),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "reading terminal input failed, listener stopping");
                return;
            }
        };

        let Some(nav) = nav else {
            continue;
        };
        debug!(event = ?nav, "key event");

        if tx.send(nav).is_err() {
            debug!("controller gone, listener stopping");
            return;
        }
        if nav == NavEvent::Quit {
            return;
        }
    }
}
