#![forbid(unsafe_code)]

//! Input and signal event threads.
//!
//! [`EventSource::spawn`] starts two background threads that feed a single
//! callback:
//!
//! - a stdin reader that decodes raw bytes through [`InputParser`] and
//!   resolves lone-ESC chunks via [`InputParser::flush`]
//! - a Unix signal listener mapping SIGWINCH to [`Event::Resize`] and
//!   SIGINT/SIGTERM to [`Event::Interrupt`]
//!
//! Each thread owns its own clone of the callback (a channel sender is
//! `Send` but not `Sync`, so sharing one instance is a non-starter). The
//! runtime passes a closure that forwards into its dispatch queue, which
//! is how every external happening becomes a message processed one at a
//! time on the dispatch thread.

use std::io::{self, Read};
use std::thread;

use crate::event::Event;
use crate::input::InputParser;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM, SIGWINCH};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Handle for the input and signal threads.
///
/// Dropping the handle shuts down the signal listener. The stdin reader
/// thread exits when stdin reaches EOF or the process ends; it blocks in
/// `read` and is intentionally detached.
pub struct EventSource {
    #[cfg(unix)]
    signal_handle: Option<signal_hook::iterator::Handle>,
    #[cfg(unix)]
    signal_thread: Option<thread::JoinHandle<()>>,
}

impl EventSource {
    /// Spawn the reader and signal threads, delivering events to
    /// `on_event`.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal listener cannot be registered.
    pub fn spawn<F>(on_event: F) -> io::Result<Self>
    where
        F: Fn(Event) + Clone + Send + 'static,
    {
        spawn_stdin_reader(on_event.clone());

        #[cfg(unix)]
        {
            let (handle, thread) = spawn_signal_listener(on_event)?;
            Ok(Self {
                signal_handle: Some(handle),
                signal_thread: Some(thread),
            })
        }
        #[cfg(not(unix))]
        {
            let _ = on_event;
            Ok(Self {})
        }
    }
}

impl Drop for EventSource {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            if let Some(handle) = self.signal_handle.take() {
                handle.close();
            }
            if let Some(thread) = self.signal_thread.take() {
                let _ = thread.join();
            }
        }
    }
}

fn spawn_stdin_reader<F>(on_event: F)
where
    F: Fn(Event) + Send + 'static,
{
    thread::spawn(move || {
        let mut stdin = io::stdin();
        let mut parser = InputParser::new();
        let mut buf = [0u8; 1024];
        loop {
            match stdin.read(&mut buf) {
                Ok(0) => {
                    tracing::debug!("stdin reached EOF, input thread exiting");
                    break;
                }
                Ok(n) => {
                    for event in parser.parse(&buf[..n]) {
                        on_event(event);
                    }
                    // A chunk ending in a bare ESC is the Escape key;
                    // terminals write whole sequences in one chunk.
                    if let Some(event) = parser.flush() {
                        on_event(event);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed, input thread exiting");
                    break;
                }
            }
        }
    });
}

#[cfg(unix)]
fn spawn_signal_listener<F>(
    on_event: F,
) -> io::Result<(signal_hook::iterator::Handle, thread::JoinHandle<()>)>
where
    F: Fn(Event) + Send + 'static,
{
    let mut signals = Signals::new([SIGWINCH, SIGINT, SIGTERM]).map_err(io::Error::other)?;
    let handle = signals.handle();
    let thread = thread::spawn(move || {
        for signal in signals.forever() {
            match signal {
                SIGWINCH => {
                    if let Ok((width, height)) = crossterm::terminal::size() {
                        on_event(Event::Resize { width, height });
                    }
                }
                SIGINT | SIGTERM => {
                    tracing::info!(signal, "termination signal received");
                    on_event(Event::Interrupt);
                }
                _ => {}
            }
        }
    });
    Ok((handle, thread))
}
