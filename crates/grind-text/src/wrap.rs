#![forbid(unsafe_code)]

//! Greedy word wrapping by visible width.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::ansi::{AnsiScanner, AnsiToken, visible_width};

/// Wrap `text` into lines of at most `width` visible columns.
///
/// Words are packed greedily; a single word wider than `width` is
/// hard-split at grapheme boundaries. Embedded newlines start a new
/// paragraph, and blank paragraphs survive as empty lines. A `width` of
/// zero is treated as one, so the function is total over its inputs.
///
/// ```
/// use grind_text::wrap;
///
/// assert_eq!(wrap("hello world foo bar", 11), vec!["hello world", "foo bar"]);
/// assert_eq!(wrap("", 10), vec![""]);
/// ```
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, width, &mut lines);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn wrap_paragraph(paragraph: &str, width: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0usize;
    let mut had_word = false;

    for word in paragraph.split_whitespace() {
        had_word = true;
        let word_width = visible_width(word);

        if word_width > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            hard_split(word, width, lines, &mut current, &mut current_width);
            continue;
        }

        let needed = if current.is_empty() {
            word_width
        } else {
            word_width + 1
        };

        if current_width + needed > width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width += needed;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    } else if !had_word {
        // Blank source line: keep the paragraph break visible.
        lines.push(String::new());
    }
}

/// Break a word wider than `width` at grapheme boundaries, carrying escape
/// sequences along at zero cost. The tail stays in `current` so following
/// words can pack after it.
fn hard_split(
    word: &str,
    width: usize,
    lines: &mut Vec<String>,
    current: &mut String,
    current_width: &mut usize,
) {
    for token in AnsiScanner::new(word) {
        match token {
            AnsiToken::Escape(seq) => current.push_str(seq),
            AnsiToken::Text(text) => {
                for grapheme in text.graphemes(true) {
                    let w = grapheme.width();
                    if *current_width + w > width && !current.is_empty() {
                        lines.push(std::mem::take(current));
                        *current_width = 0;
                    }
                    // A grapheme wider than the whole width gets a line of
                    // its own; there is no narrower way to show it.
                    current.push_str(grapheme);
                    *current_width += w;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_words_greedily() {
        assert_eq!(wrap("a bb ccc dddd", 6), vec!["a bb", "ccc", "dddd"]);
    }

    #[test]
    fn exact_fit_stays_on_one_line() {
        assert_eq!(wrap("hello world", 11), vec!["hello world"]);
    }

    #[test]
    fn empty_input_yields_one_empty_line() {
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn zero_width_is_treated_as_one() {
        let lines = wrap("ab cd", 0);
        assert!(lines.iter().all(|l| visible_width(l) <= 1));
    }

    #[test]
    fn long_word_is_hard_split() {
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn words_pack_after_split_tail() {
        assert_eq!(wrap("abcdefgh xy", 5), vec!["abcde", "fgh", "xy"]);
    }

    #[test]
    fn newlines_start_paragraphs() {
        assert_eq!(wrap("one\ntwo", 10), vec!["one", "two"]);
    }

    #[test]
    fn blank_lines_survive() {
        assert_eq!(wrap("one\n\ntwo", 10), vec!["one", "", "two"]);
    }

    #[test]
    fn styled_words_measure_visibly() {
        let lines = wrap("\x1b[31mred\x1b[0m green", 9);
        assert_eq!(lines.len(), 1);
        assert_eq!(visible_width(&lines[0]), 9);
    }

    #[test]
    fn wide_chars_wrap_by_columns() {
        assert_eq!(wrap("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn words_reconstruct_in_order() {
        let input = "the quick brown fox jumps over the lazy dog";
        let lines = wrap(input, 7);
        let rejoined = lines.join(" ");
        let words: Vec<&str> = rejoined.split_whitespace().collect();
        let original: Vec<&str> = input.split_whitespace().collect();
        assert_eq!(words, original);
    }
}
