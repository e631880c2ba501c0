#![forbid(unsafe_code)]

//! The dispatch loop.
//!
//! [`Program`] owns the single mutable [`AppModel`], drains one `mpsc`
//! queue of messages, and for each message calls the root reducer, then
//! hands the returned command to the effect executor. Executor threads
//! re-enter by *sending* on the same queue - dispatch is a trampoline, not
//! recursion, so reducers never interleave and the model needs no lock.
//!
//! Messages are processed one at a time, in arrival order, to completion.
//! Rendering happens once per drained batch: the view produces a full
//! frame string and the presenter diffs it against the last one. A screen
//! change or resize invalidates the diff state first, forcing a clean
//! repaint.
//!
//! [`Command::OpenEditor`] is interpreted here rather than in the
//! executor because it must suspend the terminal session around the child
//! process - during that window the TUI is fully dormant.

use std::io::{self, Write};
use std::process;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use grind_core::session::TerminalSession;

use crate::command::{Command, EditorTarget};
use crate::effects::Effects;
use crate::model::AppModel;
use crate::msg::Msg;
use crate::presenter::Presenter;
use crate::update::update;
use crate::view;
use crate::workspace::Workspace;

/// How long to park on the queue before re-checking the running flag.
const IDLE_POLL: Duration = Duration::from_millis(200);

/// The runtime: model owner, message pump, renderer driver.
pub struct Program<W: Write> {
    model: AppModel,
    receiver: Receiver<Msg>,
    effects: Effects,
    presenter: Presenter<W>,
    session: Option<TerminalSession>,
    workspace: Workspace,
    running: bool,
}

impl<W: Write> Program<W> {
    /// Assemble a program. `session` is `None` in headless tests.
    #[must_use]
    pub fn new(
        model: AppModel,
        receiver: Receiver<Msg>,
        effects: Effects,
        presenter: Presenter<W>,
        session: Option<TerminalSession>,
        workspace: Workspace,
    ) -> Self {
        Self {
            model,
            receiver,
            effects,
            presenter,
            session,
            workspace,
            running: true,
        }
    }

    /// Run until an exit command. Kicks off the startup auth check, then
    /// pumps the queue: drain, update, execute, render-if-dirty.
    ///
    /// # Errors
    ///
    /// Returns terminal I/O errors; everything else is normalized into
    /// messages long before it gets here.
    pub fn run(&mut self) -> io::Result<()> {
        self.execute(Command::CheckAuth)?;
        self.render()?;

        while self.running {
            match self.receiver.recv_timeout(IDLE_POLL) {
                Ok(msg) => {
                    self.dispatch(msg)?;
                    // Drain whatever else arrived, without blocking.
                    while self.running {
                        match self.receiver.try_recv() {
                            Ok(msg) => self.dispatch(msg)?,
                            Err(_) => break,
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if self.model.needs_render {
                self.render()?;
            }
        }

        self.effects.stop_timer();
        Ok(())
    }

    /// Apply one message: reduce, then execute the returned command. A
    /// screen change discards the presenter's diff state, since partial
    /// diffs against the previous screen's frame would be stale.
    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        if matches!(msg, Msg::Resize { .. }) {
            self.presenter.invalidate();
        }
        let tag_before = self.model.screen_tag();
        let command = update(&mut self.model, msg);
        if self.model.screen_tag() != tag_before {
            self.presenter.invalidate();
        }
        self.execute(command)
    }

    /// Interpret a command: loop-control and editor handoff here, all
    /// other effects in the executor.
    fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::None => Ok(()),
            Command::Batch(commands) => {
                for c in commands {
                    self.execute(c)?;
                }
                Ok(())
            }
            Command::Exit => {
                self.running = false;
                Ok(())
            }
            Command::OpenEditor(target) => self.open_editor(target),
            other => {
                self.effects.execute(other);
                Ok(())
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = view::view(&self.model);
        self.presenter.present(&frame)?;
        self.model.needs_render = false;
        Ok(())
    }

    /// Suspend the session, run the editor to completion, resume, and
    /// force a full repaint. No input is read and nothing renders while
    /// the child owns the terminal.
    fn open_editor(&mut self, target: EditorTarget) -> io::Result<()> {
        let config = self.model.shared.config.clone();
        let (path, refresh) = match &target {
            EditorTarget::Solution { slug, seed } => {
                match self.workspace.ensure_solution(slug, &config, seed) {
                    Ok(path) => (path, Command::None),
                    Err(e) => {
                        self.model.error = Some(format!("solution file: {e}"));
                        return Ok(());
                    }
                }
            }
            EditorTarget::Note { problem_id } => {
                let path = self.workspace.notes.path(*problem_id);
                if let Some(parent) = path.parent() {
                    if let Err(e) = std::fs::create_dir_all(parent) {
                        self.model.error = Some(format!("note file: {e}"));
                        return Ok(());
                    }
                }
                // Reload the note panel once the editor is done with it.
                (
                    path,
                    Command::FetchNote {
                        problem_id: *problem_id,
                    },
                )
            }
        };

        let (program, args) = resolve_editor(&config);
        tracing::info!(editor = %program, path = %path.display(), "editor handoff");

        if let Some(session) = &mut self.session {
            session.suspend()?;
        }
        let status = process::Command::new(&program)
            .args(&args)
            .arg(&path)
            .status();
        if let Some(session) = &mut self.session {
            session.resume()?;
        }

        // Whatever the editor drew, the previous frame is gone.
        self.presenter.invalidate();
        self.model.needs_render = true;

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => {
                self.model.error = Some(format!("editor exited with {status}"));
            }
            Err(e) => {
                self.model.error = Some(format!("could not launch {program}: {e}"));
            }
        }
        self.execute(refresh)
    }

    /// The current model (for tests).
    #[must_use]
    pub fn model(&self) -> &AppModel {
        &self.model
    }
}

/// Editor resolution order: workspace config, `$VISUAL`, `$EDITOR`, `vi`.
/// The configured value may carry arguments (`code --wait`).
fn resolve_editor(config: &grind_store::Config) -> (String, Vec<String>) {
    let raw = config
        .editor
        .clone()
        .or_else(|| std::env::var("VISUAL").ok().filter(|v| !v.is_empty()))
        .or_else(|| std::env::var("EDITOR").ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "vi".to_string());
    let mut parts = raw.split_whitespace().map(str::to_string);
    let program = parts.next().unwrap_or_else(|| "vi".to_string());
    (program, parts.collect())
}
