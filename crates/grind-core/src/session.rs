#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! RAII management of raw mode and the alternate screen: the session tracks
//! every mode it enabled and disables them in reverse order on [`Drop`], so
//! the terminal is restored on normal exit and on panic (an install-once
//! panic hook performs best-effort cleanup before the default handler
//! runs).
//!
//! [`TerminalSession::suspend`] hands the terminal to an external process:
//! it leaves the alternate screen, shows the cursor, and exits raw mode.
//! While suspended the TUI is fully dormant - no input is read and nothing
//! is rendered. [`TerminalSession::resume`] re-enters both modes; the
//! caller is responsible for forcing a full repaint afterwards, since
//! whatever the external process drew invalidated the previous frame.

use std::io::{self, Write};
use std::sync::OnceLock;

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Switch to the alternate screen buffer, restoring the caller's
    /// scrollback on exit.
    pub alternate_screen: bool,
    /// Hide the cursor while the session is active.
    pub hide_cursor: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            hide_cursor: true,
        }
    }
}

/// A terminal session owning raw mode and the alternate screen.
///
/// Only one session should exist at a time; a second one would fight the
/// first over terminal state.
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
    raw_enabled: bool,
    alternate_screen_enabled: bool,
    cursor_hidden: bool,
}

impl TerminalSession {
    /// Enter raw mode and enable the configured features.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled or the escape
    /// sequences cannot be written.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        let mut session = Self {
            options,
            raw_enabled: false,
            alternate_screen_enabled: false,
            cursor_hidden: false,
        };
        session.enter()?;
        Ok(session)
    }

    /// Whether stdout is attached to an interactive terminal.
    #[must_use]
    pub fn stdout_is_tty() -> bool {
        use crossterm::tty::IsTty;
        io::stdout().is_tty()
    }

    /// Current terminal size as (columns, rows).
    pub fn size() -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Release the terminal for an external process.
    pub fn suspend(&mut self) -> io::Result<()> {
        self.leave();
        tracing::debug!("terminal session suspended");
        Ok(())
    }

    /// Reclaim the terminal after an external process exits.
    pub fn resume(&mut self) -> io::Result<()> {
        self.enter()?;
        tracing::debug!("terminal session resumed");
        Ok(())
    }

    fn enter(&mut self) -> io::Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        self.raw_enabled = true;

        let mut stdout = io::stdout();
        if self.options.alternate_screen {
            crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
            self.alternate_screen_enabled = true;
        }
        if self.options.hide_cursor {
            crossterm::execute!(stdout, crossterm::cursor::Hide)?;
            self.cursor_hidden = true;
        }
        stdout.flush()
    }

    /// Disable everything that was enabled, in reverse order.
    fn leave(&mut self) {
        let mut stdout = io::stdout();
        if self.cursor_hidden {
            let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
            self.cursor_hidden = false;
        }
        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
        }
        if self.raw_enabled {
            let _ = crossterm::terminal::disable_raw_mode();
            self.raw_enabled = false;
        }
        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.leave();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

/// Restore the terminal without knowing which modes are active. Used from
/// the panic hook and the signal listener, where the session is out of
/// reach.
pub(crate) fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
    let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}
