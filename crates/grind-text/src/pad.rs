#![forbid(unsafe_code)]

//! Truncation, padding, and centering by visible width.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::ansi::{AnsiScanner, AnsiToken, RESET, is_sgr, visible_width};

/// Ellipsis used by [`truncate`]. One column wide.
const ELLIPSIS: char = '…';

/// Shorten `s` to at most `width` visible columns.
///
/// If `s` already fits it is returned unchanged. Otherwise the result ends
/// with an ellipsis and any SGR styling active at the cut point is closed
/// with a reset so the truncation can never leak color into neighboring
/// cells. A `width` of zero is treated as one.
///
/// ```
/// use grind_text::{truncate, visible_width};
///
/// assert_eq!(truncate("hello", 10), "hello");
/// assert_eq!(truncate("hello world", 8), "hello w…");
/// assert!(visible_width(&truncate("\x1b[31mhello world\x1b[0m", 5)) <= 5);
/// ```
#[must_use]
pub fn truncate(s: &str, width: usize) -> String {
    let width = width.max(1);
    if visible_width(s) <= width {
        return s.to_string();
    }

    // Reserve one column for the ellipsis.
    let budget = width - 1;
    let mut out = String::with_capacity(s.len().min(width * 4));
    let mut used = 0;
    let mut styled = false;

    'tokens: for token in AnsiScanner::new(s) {
        match token {
            AnsiToken::Escape(seq) => {
                styled = styled || is_sgr(seq);
                out.push_str(seq);
            }
            AnsiToken::Text(text) => {
                for grapheme in text.graphemes(true) {
                    let w = grapheme.width();
                    if used + w > budget {
                        break 'tokens;
                    }
                    out.push_str(grapheme);
                    used += w;
                }
            }
        }
    }

    out.push(ELLIPSIS);
    if styled {
        out.push_str(RESET);
    }
    out
}

/// Pad `s` with trailing spaces to exactly `width` visible columns.
///
/// Strings wider than `width` are truncated first, so the result always
/// measures exactly `width` columns (up to a wide grapheme landing one short
/// of the boundary).
#[must_use]
pub fn pad_right(s: &str, width: usize) -> String {
    let vis = visible_width(s);
    if vis > width {
        return fill_to(truncate(s, width), width);
    }
    let mut out = s.to_string();
    out.push_str(&" ".repeat(width - vis));
    out
}

/// Pad `s` with leading spaces to exactly `width` visible columns.
#[must_use]
pub fn pad_left(s: &str, width: usize) -> String {
    let vis = visible_width(s);
    if vis > width {
        return fill_to(truncate(s, width), width);
    }
    let mut out = " ".repeat(width - vis);
    out.push_str(s);
    out
}

/// Center `s` in `width` visible columns, biasing left on odd leftover.
#[must_use]
pub fn center(s: &str, width: usize) -> String {
    let vis = visible_width(s);
    if vis > width {
        return fill_to(truncate(s, width), width);
    }
    let left = (width - vis) / 2;
    let right = width - vis - left;
    let mut out = " ".repeat(left);
    out.push_str(s);
    out.push_str(&" ".repeat(right));
    out
}

/// Top up an already-truncated string with spaces to hit `width` exactly
/// (truncation near a wide grapheme can come up one column short).
fn fill_to(s: String, width: usize) -> String {
    let vis = visible_width(&s);
    if vis >= width {
        return s;
    }
    let mut out = s;
    out.push_str(&" ".repeat(width - vis));
    out
}
