#![forbid(unsafe_code)]

//! Problem detail rendering.
//!
//! Two layouts, switched by a width threshold: wide terminals place the
//! drawer beside the statement, narrow ones stack it underneath. Both
//! share the same wrapped content the update path uses for its scroll
//! clamps, so what the user scrolls is exactly what is drawn.

use grind_text::{BoxOptions, boxed, pad_right, truncate, visible_width};

use crate::model::AppModel;
use crate::screens::problem::{FocusRegion, Panel, ProblemModel};
use crate::view::{format_elapsed, style};

pub(super) fn render(screen: &ProblemModel, model: &AppModel) -> Vec<String> {
    let width = model.width;
    let mut lines = vec![title_line(screen, model), stats_line(screen, model)];
    lines.push(String::new());

    let body = body_window(screen, model);
    if !screen.panel.is_open() {
        lines.extend(body);
        return lines;
    }

    let drawer = drawer_block(screen, model);
    if ProblemModel::wide_layout(width) {
        let left_width = (width as usize) * 3 / 5;
        let mut rows = Vec::new();
        let count = body.len().max(drawer.len());
        for i in 0..count {
            let left = body.get(i).map_or("", String::as_str);
            let right = drawer.get(i).map_or("", String::as_str);
            let mut row = pad_right(left, left_width);
            row.push_str(right);
            rows.push(row);
        }
        lines.extend(rows);
    } else {
        lines.extend(body);
        lines.push(String::new());
        lines.extend(drawer);
    }
    lines
}

fn title_line(screen: &ProblemModel, model: &AppModel) -> String {
    let width = model.width as usize;
    let star = screen
        .problem_id()
        .filter(|id| model.shared.bookmarks.contains(id))
        .map_or("", |_| "★ ");
    let title = match &screen.detail {
        Some(detail) => format!(
            " {star}{}{}{} · {}",
            style::BOLD,
            detail.title,
            style::RESET,
            difficulty_label(detail.difficulty),
        ),
        None => format!(" {}{}{}", style::BOLD, screen.slug, style::RESET),
    };
    let running = if screen.is_running { "⋯ running  " } else { "" };
    let clock = format!("{running}⏱ {} ", format_elapsed(screen.elapsed_secs));
    let clock_width = visible_width(&clock);
    let mut line = pad_right(&title, width.saturating_sub(clock_width));
    line.push_str(&clock);
    line
}

fn stats_line(screen: &ProblemModel, model: &AppModel) -> String {
    let Some(detail) = &screen.detail else {
        return String::new();
    };
    truncate(
        &format!(
            " {}acceptance {:.1}% · ▲{} ▼{} · {} hints{}",
            style::DIM,
            detail.acceptance_rate,
            detail.likes,
            detail.dislikes,
            detail.hints.len(),
            style::RESET,
        ),
        model.width as usize,
    )
}

fn difficulty_label(difficulty: grind_client::Difficulty) -> String {
    let color = match difficulty {
        grind_client::Difficulty::Easy => style::GREEN,
        grind_client::Difficulty::Medium => style::YELLOW,
        grind_client::Difficulty::Hard => style::RED,
    };
    format!("{color}{}{}", difficulty.label(), style::RESET)
}

/// The visible slice of the wrapped statement.
fn body_window(screen: &ProblemModel, model: &AppModel) -> Vec<String> {
    let all = screen.body_lines(model.width);
    let height = screen.body_height(model.width, model.height);
    let focused = screen.focus == FocusRegion::Body && screen.panel.is_open();
    let mut out: Vec<String> = all
        .iter()
        .skip(screen.body_scroll)
        .take(height)
        .map(|l| format!(" {l}"))
        .collect();
    if focused && !out.is_empty() {
        // Focus marker on the first visible row.
        out[0] = format!("{}▌{}{}", style::CYAN, style::RESET, &out[0][1..]);
    }
    out
}

/// The drawer, boxed, with the active panel's content window.
fn drawer_block(screen: &ProblemModel, model: &AppModel) -> Vec<String> {
    let width = model.width;
    let height = ProblemModel::drawer_height(width, model.height);
    let box_width = if ProblemModel::wide_layout(width) {
        (width as usize) - (width as usize) * 3 / 5
    } else {
        width as usize
    };

    let all = decorate_snapshot_cursor(screen, screen.panel_lines(width));
    let scroll = panel_scroll(&screen.panel).min(all.len().saturating_sub(1));
    let window: Vec<String> = all.iter().skip(scroll).take(height).cloned().collect();

    let focused = screen.focus == FocusRegion::Drawer;
    let title = if focused {
        format!("{} ◂", screen.panel.label())
    } else {
        screen.panel.label().to_string()
    };
    boxed(&window, box_width, &BoxOptions::titled(title))
}

fn panel_scroll(panel: &Panel) -> usize {
    match panel {
        Panel::Hint { scroll, .. }
        | Panel::Submissions { scroll, .. }
        | Panel::Snapshots { scroll, .. }
        | Panel::Note { scroll, .. }
        | Panel::Diff { scroll, .. }
        | Panel::TestResult { scroll }
        | Panel::SubmitResult { scroll } => *scroll,
        Panel::None | Panel::Status { .. } => 0,
    }
}

/// Prefix the selected snapshot row with a cursor marker.
fn decorate_snapshot_cursor(screen: &ProblemModel, mut lines: Vec<String>) -> Vec<String> {
    if let Panel::Snapshots {
        items: Some(items),
        cursor,
        ..
    } = &screen.panel
    {
        if !items.is_empty() {
            for (i, line) in lines.iter_mut().enumerate() {
                if i == *cursor {
                    *line = format!("{}❯ {line}{}", style::CYAN, style::RESET);
                } else {
                    *line = format!("  {line}");
                }
            }
        }
    }
    lines
}
