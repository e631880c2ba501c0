#![forbid(unsafe_code)]

//! Problem list rendering.

use grind_client::Difficulty;
use grind_text::{pad_left, pad_right, truncate};

use crate::model::AppModel;
use crate::screens::ListModel;
use crate::view::style;

pub(super) fn render(screen: &ListModel, model: &AppModel) -> Vec<String> {
    let width = model.width as usize;
    let mut lines = vec![filter_line(screen, width), column_header(width)];

    let visible = screen.visible(&model.shared.bookmarks);
    let page = ListModel::page_height(model.height);

    if visible.is_empty() {
        if let Some(error) = &screen.error {
            lines.push(format!(" {}error:{} {error}", style::RED, style::RESET));
            return lines;
        }
        let placeholder = if screen.loading {
            "loading…"
        } else {
            "nothing matches the current filters"
        };
        lines.push(format!(" {}{placeholder}{}", style::DIM, style::RESET));
        return lines;
    }

    for (row, problem) in visible
        .iter()
        .enumerate()
        .skip(screen.scroll)
        .take(page)
    {
        let marker = problem.status.map_or(" ", |s| s.marker());
        let star = if model.shared.bookmarks.contains(&problem.id) {
            "★"
        } else {
            " "
        };
        let diff = difficulty_cell(problem.difficulty);
        let acc = pad_left(&format!("{:.0}%", problem.acceptance_rate), 4);
        let title_width = width.saturating_sub(22).max(8);
        let title = pad_right(&truncate(&problem.title, title_width), title_width);
        let line = format!(
            " {marker} {star} {} {title} {diff} {acc}",
            pad_left(&problem.id.to_string(), 5),
        );
        if row == screen.cursor {
            lines.push(format!("{}{}{}", style::INVERT, line, style::RESET));
        } else {
            lines.push(line);
        }
    }

    if screen.loading {
        lines.push(format!(" {}loading more…{}", style::DIM, style::RESET));
    }

    lines
}

fn filter_line(screen: &ListModel, width: usize) -> String {
    let difficulty = screen.difficulty.map_or("any", Difficulty::label);
    let status = match screen.status {
        None => "any",
        Some(grind_client::ProblemStatus::Solved) => "solved",
        Some(grind_client::ProblemStatus::Attempted) => "attempted",
        Some(grind_client::ProblemStatus::Todo) => "todo",
    };
    let bookmarked = if screen.bookmarked_only { "on" } else { "off" };
    let search = match screen.search_draft() {
        Some(draft) => format!("{draft}▏"),
        None if screen.search.is_empty() => "-".to_string(),
        None => screen.search.clone(),
    };
    let loaded = format!("{}/{}", screen.visible_hint(), screen.total);
    truncate(
        &format!(
            " {}[d]{}ifficulty: {difficulty} · {}[s]{}tatus: {status} · {}[f]{}★: {bookmarked} · {}[/]{} {search} · {loaded}",
            style::DIM, style::RESET,
            style::DIM, style::RESET,
            style::DIM, style::RESET,
            style::DIM, style::RESET,
        ),
        width,
    )
}

fn column_header(width: usize) -> String {
    let title_width = width.saturating_sub(22).max(8);
    truncate(
        &format!(
            "{}       id {} diff  acc%{}",
            style::DIM,
            pad_right("title", title_width),
            style::RESET
        ),
        width,
    )
}

fn difficulty_cell(difficulty: Difficulty) -> String {
    let color = match difficulty {
        Difficulty::Easy => style::GREEN,
        Difficulty::Medium => style::YELLOW,
        Difficulty::Hard => style::RED,
    };
    let padded = pad_right(difficulty.label(), 6);
    format!("{color}{padded}{}", style::RESET)
}

impl ListModel {
    /// Count of rows currently loaded (after the client-side filter the
    /// view applies). Kept here because only rendering needs it.
    fn visible_hint(&self) -> usize {
        self.problems.len()
    }
}
