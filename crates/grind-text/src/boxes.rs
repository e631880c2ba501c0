#![forbid(unsafe_code)]

//! Bordered text blocks.

use crate::ansi::visible_width;
use crate::pad::{pad_right, truncate};

/// Glyph set for a box border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub horizontal: &'static str,
    pub vertical: &'static str,
}

impl BorderGlyphs {
    /// Light single-line border.
    pub const PLAIN: Self = Self {
        top_left: "┌",
        top_right: "┐",
        bottom_left: "└",
        bottom_right: "┘",
        horizontal: "─",
        vertical: "│",
    };

    /// Rounded corners.
    pub const ROUNDED: Self = Self {
        top_left: "╭",
        top_right: "╮",
        bottom_left: "╰",
        bottom_right: "╯",
        horizontal: "─",
        vertical: "│",
    };

    /// Double-line border.
    pub const DOUBLE: Self = Self {
        top_left: "╔",
        top_right: "╗",
        bottom_left: "╚",
        bottom_right: "╝",
        horizontal: "═",
        vertical: "║",
    };

    /// Heavy single-line border.
    pub const HEAVY: Self = Self {
        top_left: "┏",
        top_right: "┓",
        bottom_left: "┗",
        bottom_right: "┛",
        horizontal: "━",
        vertical: "┃",
    };
}

/// Options for [`boxed`].
#[derive(Debug, Clone)]
pub struct BoxOptions {
    /// Border glyph set.
    pub glyphs: BorderGlyphs,
    /// Optional title embedded in the top border.
    pub title: Option<String>,
    /// Horizontal padding between the border and content, in columns.
    pub padding: usize,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            glyphs: BorderGlyphs::PLAIN,
            title: None,
            padding: 1,
        }
    }
}

impl BoxOptions {
    /// Options with a title and default border.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Replace the glyph set.
    #[must_use]
    pub fn glyphs(mut self, glyphs: BorderGlyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Replace the horizontal padding.
    #[must_use]
    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }
}

/// Draw a border around `content`, producing lines exactly `width` columns
/// wide. Content lines wider than the interior are truncated; `width` is
/// clamped so there is always at least one interior column.
#[must_use]
pub fn boxed(content: &[String], width: usize, options: &BoxOptions) -> Vec<String> {
    let g = options.glyphs;
    // Interior columns between the two vertical border glyphs.
    let inner = width.saturating_sub(2).max(options.padding * 2 + 1);
    let content_width = inner - options.padding * 2;
    let pad = " ".repeat(options.padding);

    let mut out = Vec::with_capacity(content.len() + 2);

    let mut top = String::from(g.top_left);
    match &options.title {
        Some(title) if !title.is_empty() => {
            let label = truncate(&format!(" {title} "), inner);
            let label_width = visible_width(&label);
            top.push_str(&label);
            top.push_str(&g.horizontal.repeat(inner - label_width));
        }
        _ => top.push_str(&g.horizontal.repeat(inner)),
    }
    top.push_str(g.top_right);
    out.push(top);

    for line in content {
        let mut row = String::from(g.vertical);
        row.push_str(&pad);
        row.push_str(&pad_right(line, content_width));
        row.push_str(&pad);
        row.push_str(g.vertical);
        out.push(row);
    }

    let mut bottom = String::from(g.bottom_left);
    bottom.push_str(&g.horizontal.repeat(inner));
    bottom.push_str(g.bottom_right);
    out.push(bottom);

    out
}
