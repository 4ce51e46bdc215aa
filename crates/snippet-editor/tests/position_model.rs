//! Position model validation
//!
//! Round-trip: for any text and offset, `caret_to_offset(offset_to_caret(offset)) == offset`.

use rand::Rng;
use snippet_editor::{Caret, TextMetrics, WidthMode, caret_to_offset, offset_to_caret};

fn random_text(rng: &mut impl Rng, len: usize) -> String {
    const ALPHABET: [char; 7] = ['a', 'b', ' ', '\t', '\n', '{', '你'];
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

#[test]
fn test_round_trip_random_texts() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let len = rng.gen_range(0..60);
        let text = random_text(&mut rng, len);
        let metrics = TextMetrics::with_tab_width(rng.gen_range(1..9));

        for offset in 0..=text.chars().count() {
            let caret = offset_to_caret(&text, offset, metrics);
            assert_eq!(caret.char_index, offset);
            assert_eq!(
                caret_to_offset(&text, caret.line, caret.column, metrics),
                offset,
                "text={text:?} offset={offset} caret={caret:?}"
            );
        }
    }
}

#[test]
fn test_round_trip_unicode_widths() {
    let metrics = TextMetrics {
        tab_width: 4,
        width_mode: WidthMode::Unicode,
    };
    let text = "你好\tworld\n\t世界!";
    for offset in 0..=text.chars().count() {
        let caret = offset_to_caret(text, offset, metrics);
        assert_eq!(caret_to_offset(text, caret.line, caret.column, metrics), offset);
    }
}

#[test]
fn test_two_tabs_then_char() {
    let caret = offset_to_caret("\t\tX", 2, TextMetrics::default());
    assert_eq!(
        caret,
        Caret {
            line: 1,
            column: 9,
            char_index: 2
        }
    );
}

#[test]
fn test_line_and_column_counting() {
    let metrics = TextMetrics::default();
    let text = "first\n\tsecond\n\nlast";

    let caret = offset_to_caret(text, 7, metrics);
    assert_eq!((caret.line, caret.column), (2, 5));

    let caret = offset_to_caret(text, 14, metrics);
    assert_eq!((caret.line, caret.column), (3, 1));

    let caret = offset_to_caret(text, text.chars().count(), metrics);
    assert_eq!((caret.line, caret.column), (4, 5));
}

#[test]
fn test_out_of_range_requests_clamp() {
    let metrics = TextMetrics::default();
    let text = "ab\n\tcd";

    // Column past end of line -> end of that line.
    assert_eq!(caret_to_offset(text, 1, 40, metrics), 2);
    assert_eq!(caret_to_offset(text, 2, 40, metrics), 6);
    // Line past the last line -> end of text.
    assert_eq!(caret_to_offset(text, 3, 1, metrics), 6);
    // Offset past the end -> end of text.
    assert_eq!(offset_to_caret(text, 99, metrics).char_index, 6);
}

#[test]
fn test_tab_width_setting() {
    let metrics = TextMetrics::with_tab_width(2);
    assert_eq!(offset_to_caret("\t\tX", 2, metrics).column, 5);
    assert_eq!(caret_to_offset("\t\tX", 1, 5, metrics), 2);
}
