//! Fuzz-ish properties for the input decoder: arbitrary byte soup must
//! never panic, and decoding well-formed sequences is chunking-invariant.

use grind_core::event::Event;
use grind_core::input::InputParser;
use proptest::prelude::*;

proptest! {
    #[test]
    fn arbitrary_bytes_never_panic(input in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut parser = InputParser::new();
        let _ = parser.parse(&input);
        let _ = parser.flush();
    }

    #[test]
    fn chunking_does_not_change_decoding(
        input in prop::collection::vec(any::<u8>(), 0..128),
        split in 0usize..128,
    ) {
        // Decoding the whole buffer at once must match decoding it in two
        // chunks, as long as flush only runs at the very end (flush is the
        // end-of-input heuristic, not a mid-stream operation).
        let mut whole = InputParser::new();
        let mut expected = whole.parse(&input);
        if let Some(e) = whole.flush() {
            expected.push(e);
        }

        let split = split.min(input.len());
        let mut parts = InputParser::new();
        let mut actual = parts.parse(&input[..split]);
        actual.extend(parts.parse(&input[split..]));
        if let Some(e) = parts.flush() {
            actual.push(e);
        }

        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn printable_ascii_round_trips(s in "[ -~]{0,64}") {
        let mut parser = InputParser::new();
        let events = parser.parse(s.as_bytes());
        let decoded: String = events
            .iter()
            .filter_map(|e| match e {
                Event::Key(k) => match k.code {
                    grind_core::event::KeyCode::Char(c) if k.modifiers.is_empty() => Some(c),
                    _ => None,
                },
                _ => None,
            })
            .collect();
        prop_assert_eq!(decoded, s);
    }
}
