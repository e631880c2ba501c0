//! Property tests for the layout primitives.
//!
//! These pin the invariant every renderer column depends on: measurement,
//! truncation, padding, and wrapping all agree on visible width, no matter
//! what escape sequences or wide characters the input carries.

use grind_text::{boxed, center, pad_left, pad_right, strip_ansi, truncate, visible_width, wrap};
use grind_text::BoxOptions;
use proptest::prelude::*;

/// Text with occasional SGR sequences mixed in.
fn styled_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => "[a-zA-Z0-9 .,!?-]{1,12}",
            1 => Just("\x1b[31m".to_string()),
            1 => Just("\x1b[1;4m".to_string()),
            1 => Just("\x1b[0m".to_string()),
        ],
        0..8,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn truncate_never_exceeds_width(s in styled_text(), w in 1usize..40) {
        let out = truncate(&s, w);
        prop_assert!(visible_width(&out) <= w);
    }

    #[test]
    fn truncate_is_identity_when_fitting(s in styled_text(), w in 1usize..120) {
        if visible_width(&s) <= w {
            prop_assert_eq!(truncate(&s, w), s);
        }
    }

    #[test]
    fn pad_hits_exact_width(s in styled_text(), w in 1usize..60) {
        prop_assert_eq!(visible_width(&pad_right(&s, w)), w);
        prop_assert_eq!(visible_width(&pad_left(&s, w)), w);
        prop_assert_eq!(visible_width(&center(&s, w)), w);
    }

    #[test]
    fn wrap_respects_width(s in "[a-z ]{0,200}", w in 1usize..50) {
        for line in wrap(&s, w) {
            prop_assert!(visible_width(&line) <= w);
        }
    }

    #[test]
    fn wrap_preserves_word_order(s in "[a-z ]{0,200}", w in 6usize..50) {
        // Words no wider than the wrap width are never split, so joining
        // the wrapped lines with spaces reconstructs the word sequence.
        let input: Vec<String> = s
            .split_whitespace()
            .map(|word| word.chars().take(w).collect())
            .collect();
        let text = input.join(" ");
        let rejoined = wrap(&text, w).join(" ");
        let words: Vec<&str> = rejoined.split_whitespace().collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        prop_assert_eq!(words, original);
    }

    #[test]
    fn strip_is_prefix_free_of_escapes(s in styled_text()) {
        prop_assert!(!strip_ansi(&s).contains('\x1b'));
    }

    #[test]
    fn boxed_rows_are_uniform(
        content in prop::collection::vec("[a-z ]{0,30}", 0..6),
        w in 8usize..60,
    ) {
        let rows = boxed(&content, w, &BoxOptions::default());
        let first = visible_width(&rows[0]);
        for row in &rows {
            prop_assert_eq!(visible_width(row), first);
        }
    }
}
