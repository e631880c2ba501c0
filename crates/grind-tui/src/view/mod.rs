#![forbid(unsafe_code)]

//! Frame rendering.
//!
//! `view(model) -> String` is pure and deterministic for a given model and
//! terminal size: one header line, the active screen's body, one status
//! line, every line measured and clipped by the escape-aware layout
//! primitives. The runtime diffs consecutive frames line-by-line, so the
//! renderer's only job is to produce the full frame text.

mod help;
mod home;
mod list;
mod login;
mod problem;
mod profile;

use grind_text::{pad_right, truncate, visible_width};

use crate::model::AppModel;
use crate::screens::ScreenState;

/// SGR helpers used across the views.
pub(crate) mod style {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const INVERT: &str = "\x1b[7m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RED: &str = "\x1b[31m";
    pub const CYAN: &str = "\x1b[36m";
}

/// Render the whole frame: header, body, status line. The result always
/// has exactly `model.height` lines, each at most `model.width` columns.
#[must_use]
pub fn view(model: &AppModel) -> String {
    let width = model.width as usize;
    let content_height = model.content_height();

    let mut body = match &model.screen {
        ScreenState::Home(screen) => home::render(screen, model),
        ScreenState::List(screen) => list::render(screen, model),
        ScreenState::Problem(screen) => problem::render(screen, model),
        ScreenState::Login(screen) => login::render(screen, model),
        ScreenState::Profile(screen) => profile::render(screen, model),
        ScreenState::Help(screen) => help::render(screen, model),
    };

    body.truncate(content_height);
    while body.len() < content_height {
        body.push(String::new());
    }

    let mut lines = Vec::with_capacity(content_height + 2);
    lines.push(header_line(model, width));
    lines.extend(body);
    lines.push(status_line(model, width));
    // Terminals shorter than the chrome still get exactly `height` lines.
    lines.truncate((model.height as usize).max(1));

    let clipped: Vec<String> = lines.iter().map(|line| truncate(line, width)).collect();
    clipped.join("\n")
}

fn header_line(model: &AppModel, width: usize) -> String {
    let title = model.screen.title();
    let left = format!(" {}grind{} · {title}", style::BOLD, style::RESET);
    let right = match &model.shared.user {
        Some(user) if user.is_premium => format!("{} ◆{} ", user.username, style::RESET),
        Some(user) => format!("{} ", user.username),
        None => format!("{}signed out{} ", style::DIM, style::RESET),
    };
    let right_width = visible_width(&right);
    let mut line = pad_right(&left, width.saturating_sub(right_width));
    line.push_str(&right);
    line
}

fn status_line(model: &AppModel, width: usize) -> String {
    if let Some(error) = &model.error {
        return truncate(
            &format!(" {}error:{} {error}", style::RED, style::RESET),
            width,
        );
    }
    let hints = match &model.screen {
        ScreenState::Home(_) => "↑↓ move · enter select · ? help · q quit",
        ScreenState::List(list) if list.is_searching() => "type to search · enter apply · esc cancel",
        ScreenState::List(_) => "enter open · d/s/f filter · / search · ? help · esc back",
        ScreenState::Problem(_) => {
            "h hints · s subs · a snaps · o note · t test · S submit · e edit · esc back"
        }
        ScreenState::Login(_) => "tab switch field · enter sign in · esc clear/back",
        ScreenState::Profile(_) => "r refresh · esc back",
        ScreenState::Help(_) => "↑↓ scroll · esc close",
    };
    format!(" {}{hints}{}", style::DIM, style::RESET)
}

/// Format seconds as `m:ss` (or `h:mm:ss` past an hour).
#[must_use]
pub(crate) fn format_elapsed(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grind_store::Config;
    use std::collections::BTreeSet;

    fn model() -> AppModel {
        AppModel::new(Config::default(), BTreeSet::new())
    }

    #[test]
    fn frame_has_exact_dimensions() {
        let mut m = model();
        m.width = 80;
        m.height = 24;
        let frame = view(&m);
        let lines: Vec<&str> = frame.split('\n').collect();
        assert_eq!(lines.len(), 24);
        for line in lines {
            assert!(visible_width(line) <= 80, "overwide line: {line:?}");
        }
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut m = model();
        m.width = 4;
        m.height = 3;
        let frame = view(&m);
        assert_eq!(frame.split('\n').count(), 3);
    }

    #[test]
    fn view_is_deterministic() {
        let m = model();
        assert_eq!(view(&m), view(&m));
    }

    #[test]
    fn error_banner_takes_status_line() {
        let mut m = model();
        m.error = Some("boom".into());
        let frame = view(&m);
        assert!(frame.contains("boom"));
    }

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(61), "1:01");
        assert_eq!(format_elapsed(3 * 3600 + 62), "3:01:02");
    }
}
