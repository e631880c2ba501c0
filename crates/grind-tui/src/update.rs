#![forbid(unsafe_code)]

//! The root reducer.
//!
//! `update(model, msg) -> Command` is the only place application state
//! changes. Global messages (interrupt, resize, timer, auth results,
//! quit/help keys) are handled first regardless of the active screen;
//! everything else routes to the active screen's own state machine. A
//! message the current screen has no handler for is a no-op by design, not
//! an error - effect results can legitimately arrive after the screen that
//! requested them is gone.
//!
//! Navigation: `navigate_to` pushes the outgoing screen onto the history
//! stack; `Back` pops it, defaulting to home. Leaving a problem screen
//! stops the solve timer; landing back on one restarts it.

use grind_core::event::{KeyCode, KeyEvent};

use crate::command::Command;
use crate::model::AppModel;
use crate::msg::Msg;
use crate::screens::{Ctx, HelpModel, LoginModel, Outcome, ProblemModel, ScreenState, ScreenTag};

/// Apply one message. Pure: no I/O ever happens here; side effects are
/// returned as a [`Command`] for the executor.
pub fn update(model: &mut AppModel, msg: Msg) -> Command {
    model.needs_render = true;
    tracing::trace!(msg = msg.name(), screen = ?model.screen_tag(), "update");

    match msg {
        Msg::Interrupt => Command::Exit,

        Msg::Resize { width, height } => {
            model.width = width.max(1);
            model.height = height.max(1);
            Command::None
        }

        Msg::TimerTick => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                problem.on_timer_tick();
            }
            Command::None
        }

        Msg::Key(key) => on_key(model, &key),

        Msg::AuthChecked(result) => on_auth_checked(model, result),

        Msg::LoginFinished(result) => on_login_finished(model, result),

        Msg::LoggedOut => {
            model.shared.user = None;
            Command::None
        }

        Msg::ProblemReady(detail) => on_problem_ready(model, detail),

        Msg::ProblemReadyFailed { error } => {
            if let ScreenState::Home(home) = &mut model.screen {
                home.pending = None;
            }
            model.error = Some(error);
            Command::None
        }

        Msg::ProblemsLoaded {
            generation,
            append,
            page,
        } => {
            if let ScreenState::List(list) = &mut model.screen {
                let ctx = Ctx {
                    width: model.width,
                    height: model.height,
                    user: model.shared.user.as_ref(),
                    config: &model.shared.config,
                    bookmarks: &mut model.shared.bookmarks,
                };
                list.on_page(generation, append, page, &ctx);
            }
            Command::None
        }

        Msg::ProblemsFailed { generation, error } => {
            if let ScreenState::List(list) = &mut model.screen {
                list.on_fetch_error(generation, error);
            }
            Command::None
        }

        Msg::ProblemLoaded { slug, detail } => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                problem.on_detail(&slug, detail);
            }
            Command::None
        }

        Msg::ProblemFailed { slug, error } => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                problem.on_detail_error(&slug, error);
            }
            Command::None
        }

        Msg::SubmissionsLoaded { slug, submissions } => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                problem.on_submissions(&slug, submissions);
            }
            Command::None
        }

        Msg::SubmissionsFailed { slug, error } => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                if problem.slug == slug {
                    problem.on_operation_error(format!("submissions: {error}"));
                }
            }
            Command::None
        }

        Msg::SubmissionDetailLoaded { slug, detail } => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                problem.on_submission_detail(&slug, detail.code);
            }
            Command::None
        }

        Msg::SubmissionDetailFailed { slug, error } => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                if problem.slug == slug {
                    problem.on_operation_error(format!("submission: {error}"));
                }
            }
            Command::None
        }

        Msg::NoteLoaded { problem_id, text } => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                problem.on_note(problem_id, text);
            }
            Command::None
        }

        Msg::NoteFailed { problem_id, error } => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                if problem.problem_id() == Some(problem_id) {
                    problem.on_operation_error(format!("note: {error}"));
                }
            }
            Command::None
        }

        Msg::SnapshotsLoaded {
            problem_id,
            snapshots,
        } => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                problem.on_snapshots(problem_id, snapshots);
            }
            Command::None
        }

        Msg::SnapshotSaved {
            problem_id,
            snapshots,
        } => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                problem.on_snapshot_saved(problem_id, snapshots);
            }
            Command::None
        }

        Msg::SnapshotSaveFailed { problem_id, error } => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                if problem.problem_id() == Some(problem_id) {
                    problem.on_operation_error(format!("snapshot save: {error}"));
                }
            }
            Command::None
        }

        Msg::DiffReady { problem_id, diff } => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                problem.on_diff(problem_id, diff);
            }
            Command::None
        }

        Msg::DiffFailed { problem_id, error } => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                if problem.problem_id() == Some(problem_id) {
                    problem.on_operation_error(format!("diff: {error}"));
                }
            }
            Command::None
        }

        Msg::TestFinished { slug, result } => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                problem.on_test_finished(&slug, result);
            }
            Command::None
        }

        Msg::SubmitFinished { slug, result } => {
            if let ScreenState::Problem(problem) = &mut model.screen {
                problem.on_submit_finished(&slug, result);
            }
            Command::None
        }

        Msg::ProfileLoaded {
            username,
            profile,
            skills,
        } => {
            if let ScreenState::Profile(screen) = &mut model.screen {
                screen.on_loaded(&username, profile, skills);
            }
            Command::None
        }

        Msg::ProfileFailed { username, error } => {
            if let ScreenState::Profile(screen) = &mut model.screen {
                screen.on_failed(&username, error);
            }
            Command::None
        }
    }
}

fn on_key(model: &mut AppModel, key: &KeyEvent) -> Command {
    // Ctrl-C exits from anywhere, including text entry.
    if key.ctrl() && matches!(key.code, KeyCode::Char('c')) {
        return Command::Exit;
    }

    // Global single-letter bindings are suppressed while a screen is
    // consuming text input.
    if !model.screen.captures_text_input() {
        match key.code {
            KeyCode::Char('q') if model.screen_tag() == ScreenTag::Home => {
                return Command::Exit;
            }
            KeyCode::Char('?') => return toggle_help(model),
            KeyCode::Char('L') => {
                model.shared.config.lang = next_lang(&model.shared.config.lang).to_string();
                return Command::SaveConfig(model.shared.config.clone());
            }
            _ => {}
        }
    }

    route_key(model, key)
}

/// Solution languages, in `L`-cycling order.
const LANGS: &[&str] = &[
    "rust",
    "python3",
    "java",
    "cpp",
    "golang",
    "javascript",
    "typescript",
];

fn next_lang(current: &str) -> &'static str {
    let at = LANGS.iter().position(|l| *l == current).unwrap_or(0);
    LANGS[(at + 1) % LANGS.len()]
}

/// `?` pushes the help overlay; a second `?` (or Escape inside it) pops.
fn toggle_help(model: &mut AppModel) -> Command {
    if model.screen_tag() == ScreenTag::Help {
        model.go_back();
    } else {
        model.navigate_to(ScreenState::help());
    }
    Command::None
}

fn route_key(model: &mut AppModel, key: &KeyEvent) -> Command {
    let outcome = {
        let mut ctx = Ctx {
            width: model.width,
            height: model.height,
            user: model.shared.user.as_ref(),
            config: &model.shared.config,
            bookmarks: &mut model.shared.bookmarks,
        };
        match &mut model.screen {
            ScreenState::Home(screen) => screen.on_key(key, &mut ctx),
            ScreenState::List(screen) => screen.on_key(key, &mut ctx),
            ScreenState::Problem(screen) => screen.on_key(key, &mut ctx),
            ScreenState::Login(screen) => screen.on_key(key, &mut ctx),
            ScreenState::Profile(screen) => screen.on_key(key, &mut ctx),
            ScreenState::Help(screen) => help_on_key(screen, key),
        }
    };

    match outcome {
        Outcome::Command(cmd) => cmd,
        Outcome::Ignored => Command::None,
        Outcome::Back => go_back(model),
        Outcome::Push(screen, cmd) => {
            model.navigate_to(screen);
            cmd
        }
    }
}

fn help_on_key(help: &mut HelpModel, key: &KeyEvent) -> Outcome {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            help.scroll += 1;
            Outcome::Command(Command::None)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            help.scroll = help.scroll.saturating_sub(1);
            Outcome::Command(Command::None)
        }
        KeyCode::Escape | KeyCode::Char('q') => Outcome::Back,
        _ => Outcome::Ignored,
    }
}

/// Pop navigation history, stopping the solve timer when a problem screen
/// is left and restarting it when another one resurfaces.
fn go_back(model: &mut AppModel) -> Command {
    let departed = model.go_back();
    let mut cmds = Vec::new();
    if matches!(departed, ScreenState::Problem(_)) {
        cmds.push(Command::StopTimer);
        if matches!(model.screen, ScreenState::Problem(_)) {
            cmds.push(Command::StartTimer);
        }
    }
    Command::batch(cmds)
}

fn on_auth_checked(model: &mut AppModel, result: Result<grind_client::AuthUser, String>) -> Command {
    match result {
        Ok(user) => {
            tracing::info!(username = %user.username, "signed in");
            model.shared.user = Some(user);
            model.error = None;
        }
        Err(error) => {
            tracing::warn!(error = %error, "auth check failed");
            model.shared.user = None;
            model.error = Some(error);
            if model.screen_tag() != ScreenTag::Login {
                model.navigate_to(ScreenState::Login(LoginModel::default()));
            }
        }
    }
    Command::None
}

fn on_login_finished(
    model: &mut AppModel,
    result: Result<grind_client::AuthUser, String>,
) -> Command {
    match result {
        Ok(user) => {
            model.shared.user = Some(user);
            model.error = None;
            if model.screen_tag() == ScreenTag::Login {
                model.go_back();
            }
        }
        Err(error) => {
            if let ScreenState::Login(login) = &mut model.screen {
                login.on_failed(error);
            } else {
                model.error = Some(error);
            }
        }
    }
    Command::None
}

/// A daily/random problem arrived. Only honored while still on the home
/// screen that requested it; otherwise the user has moved on and the
/// response is stale.
fn on_problem_ready(
    model: &mut AppModel,
    detail: Box<grind_client::ProblemDetail>,
) -> Command {
    match &mut model.screen {
        ScreenState::Home(home) => home.pending = None,
        _ => {
            tracing::debug!("problem arrival dropped, home screen no longer active");
            return Command::None;
        }
    }
    model.navigate_to(ScreenState::Problem(ProblemModel::with_detail(detail)));
    Command::StartTimer
}
