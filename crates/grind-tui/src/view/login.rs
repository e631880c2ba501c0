#![forbid(unsafe_code)]

//! Sign-in form rendering.

use grind_text::{BoxOptions, boxed, center};

use crate::model::AppModel;
use crate::screens::LoginModel;
use crate::screens::login::LoginField;
use crate::view::style;

/// Tokens render masked; only their length is visible.
fn masked(value: &str) -> String {
    "•".repeat(value.chars().count())
}

pub(super) fn render(screen: &LoginModel, model: &AppModel) -> Vec<String> {
    let width = model.width as usize;
    let box_width = width.clamp(20, 60);

    let field = |label: &str, value: &str, focused: bool| {
        let marker = if focused { "❯" } else { " " };
        let cursor = if focused { "▏" } else { "" };
        format!("{marker} {label}: {}{cursor}", masked(value))
    };

    let mut content = vec![
        "paste the session cookies from your browser".to_string(),
        String::new(),
        field(
            "session",
            &screen.session,
            screen.field == LoginField::Session,
        ),
        field("csrf   ", &screen.csrf, screen.field == LoginField::Csrf),
    ];
    if screen.submitting {
        content.push(String::new());
        content.push(format!("{}signing in…{}", style::DIM, style::RESET));
    }
    if let Some(error) = &screen.error {
        content.push(String::new());
        content.push(format!("{}{error}{}", style::RED, style::RESET));
    }

    let block = boxed(&content, box_width, &BoxOptions::titled("sign in"));
    let mut lines = vec![String::new(), String::new()];
    for row in block {
        lines.push(center(&row, width));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use grind_store::Config;
    use std::collections::BTreeSet;

    #[test]
    fn tokens_are_never_rendered_in_clear() {
        let mut model = AppModel::new(Config::default(), BTreeSet::new());
        model.width = 80;
        model.height = 24;
        let screen = LoginModel {
            session: "super-secret-token".into(),
            csrf: "csrf-value".into(),
            ..LoginModel::default()
        };
        let joined = render(&screen, &model).join("\n");
        assert!(!joined.contains("super-secret-token"));
        assert!(!joined.contains("csrf-value"));
        assert!(joined.contains("••"));
    }

    #[test]
    fn error_is_rendered() {
        let model = AppModel::new(Config::default(), BTreeSet::new());
        let screen = LoginModel {
            error: Some("invalid session".into()),
            ..LoginModel::default()
        };
        let joined = render(&screen, &model).join("\n");
        assert!(joined.contains("invalid session"));
    }
}
