#![forbid(unsafe_code)]

//! Home menu rendering.

use grind_text::center;

use crate::model::AppModel;
use crate::screens::HomeModel;
use crate::screens::home::HomeEntry;
use crate::view::style;

pub(super) fn render(screen: &HomeModel, model: &AppModel) -> Vec<String> {
    let width = model.width as usize;
    let signed_in = model.shared.user.is_some();

    let mut lines = vec![
        String::new(),
        center(&format!("{}g r i n d{}", style::BOLD, style::RESET), width),
        center("sharpen your problem-solving", width),
        String::new(),
    ];

    for (i, entry) in HomeEntry::ALL.iter().enumerate() {
        let label = entry.label(signed_in);
        let row = if i == screen.cursor {
            format!("{}❯ {label}{}", style::CYAN, style::RESET)
        } else {
            format!("  {label}")
        };
        lines.push(center(&row, width));
    }

    if let Some(pending) = screen.pending {
        lines.push(String::new());
        lines.push(center(
            &format!("{}fetching {pending}…{}", style::DIM, style::RESET),
            width,
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use grind_store::Config;
    use std::collections::BTreeSet;

    #[test]
    fn renders_all_entries_and_cursor() {
        let model = AppModel::new(Config::default(), BTreeSet::new());
        let screen = HomeModel {
            cursor: 2,
            pending: None,
        };
        let lines = render(&screen, &model);
        let joined = lines.join("\n");
        assert!(joined.contains("browse problems"));
        assert!(joined.contains("quit"));
        assert!(joined.contains("❯ random problem"));
    }

    #[test]
    fn pending_fetch_is_shown() {
        let model = AppModel::new(Config::default(), BTreeSet::new());
        let screen = HomeModel {
            cursor: 0,
            pending: Some("daily challenge"),
        };
        let joined = render(&screen, &model).join("\n");
        assert!(joined.contains("fetching daily challenge…"));
    }
}
