#![forbid(unsafe_code)]

//! Help overlay rendering.

use grind_text::pad_right;

use crate::model::AppModel;
use crate::screens::HelpModel;
use crate::view::style;

const BINDINGS: &[(&str, &str)] = &[
    ("global", ""),
    ("?", "toggle this help"),
    ("ctrl-c", "quit"),
    ("q", "quit (home screen)"),
    ("L", "cycle solution language"),
    ("esc", "close panel / go back"),
    ("", ""),
    ("lists", ""),
    ("j/k ↑/↓", "move cursor"),
    ("g/G", "jump to top/bottom"),
    ("enter", "open selection"),
    ("d", "cycle difficulty filter"),
    ("s", "cycle status filter"),
    ("f", "bookmarked only"),
    ("/", "search"),
    ("r", "reload"),
    ("", ""),
    ("problem", ""),
    ("h", "hints (n/p to step)"),
    ("s", "submissions (1-9 view code)"),
    ("a", "snapshots (enter diff, x delete)"),
    ("o", "note (O edit in editor)"),
    ("w", "save snapshot"),
    ("t", "run tests"),
    ("S", "submit"),
    ("b", "bookmark"),
    ("e", "open in editor"),
    ("tab", "switch body/drawer focus"),
];

pub(super) fn render(screen: &HelpModel, model: &AppModel) -> Vec<String> {
    let height = model.content_height();
    let scroll = screen.scroll.min(BINDINGS.len().saturating_sub(1));
    BINDINGS
        .iter()
        .skip(scroll)
        .take(height)
        .map(|(keys, action)| {
            if action.is_empty() {
                format!(" {}{keys}{}", style::BOLD, style::RESET)
            } else {
                format!("   {} {action}", pad_right(keys, 10))
            }
        })
        .collect()
}
