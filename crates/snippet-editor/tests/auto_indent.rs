use pretty_assertions::assert_eq;
use snippet_editor::{LanguageConfig, LexState, TypedChars, insert_newline, newline_indent};

fn js() -> LanguageConfig {
    LanguageConfig::javascript()
}

#[test]
fn test_indent_after_opening_brace() {
    let (text, caret) = insert_newline("if (x) {", 8, TypedChars::last('{'), &js());
    assert_eq!(text, "if (x) {\n\t");
    assert_eq!(caret, 10);
}

#[test]
fn test_opener_with_trailing_space() {
    let (text, caret) = insert_newline("\tif (x) { ", 10, TypedChars::last(' '), &js());
    assert_eq!(text, "\tif (x) { \n\t\t");
    assert_eq!(caret, 13);
}

#[test]
fn test_closing_bracket_after_caret_aligns_with_opener() {
    let (text, caret) = insert_newline("if (x) {}", 8, TypedChars::last('{'), &js());
    assert_eq!(text, "if (x) {\n}");
    assert_eq!(caret, 9);
}

#[test]
fn test_plain_line_keeps_indent() {
    let (text, caret) = insert_newline("{\n\t\tfoo();", 10, TypedChars::last(';'), &js());
    assert_eq!(text, "{\n\t\tfoo();\n\t\t");
    assert_eq!(caret, 13);
}

#[test]
fn test_lone_closer_drops_its_tab() {
    let input = "if (x) {\n\tfoo();\n\t}";
    let (text, caret) = insert_newline(input, input.chars().count(), TypedChars::last('}'), &js());
    assert_eq!(text, "if (x) {\n\tfoo();\n}\n");
    assert_eq!(caret, text.chars().count());
}

#[test]
fn test_deeper_closer_keeps_line_and_unnests() {
    let edit = newline_indent("\t\t}", "", TypedChars::last('}'), LexState::CODE, &js());
    assert_eq!(edit.before, "\t\t}");
    assert_eq!(edit.indent, 1);
}

#[test]
fn test_second_last_typed_closer_counts() {
    let typed = TypedChars {
        last: Some(')'),
        second_last: Some('}'),
    };
    let edit = newline_indent("\t\t})", "", typed, LexState::CODE, &js());
    assert_eq!(edit.indent, 0);

    let typed = TypedChars {
        last: Some(';'),
        second_last: Some(')'),
    };
    let edit = newline_indent("\tfoo(bar);", "", typed, LexState::CODE, &js());
    assert_eq!(edit.indent, 1);
}

#[test]
fn test_after_text_moves_to_new_line_without_leading_space() {
    let (text, caret) = insert_newline("foo(a,   b)", 6, TypedChars::last(','), &js());
    assert_eq!(text, "foo(a,\nb)");
    assert_eq!(caret, 7);
}

#[test]
fn test_preceding_lines_lexical_state_is_used() {
    // The "{" sits inside a template literal opened on the previous line.
    let input = "s = `\n{";
    let (text, _) = insert_newline(input, input.chars().count(), TypedChars::last('{'), &js());
    assert_eq!(text, "s = `\n{\n");
}

#[test]
fn test_caret_in_middle_of_buffer() {
    let input = "a {\nb\n}";
    // Enter right after "a {".
    let (text, caret) = insert_newline(input, 3, TypedChars::last('{'), &js());
    assert_eq!(text, "a {\n\t\nb\n}");
    assert_eq!(caret, 5);
}

#[test]
fn test_newline_edit_text_and_caret() {
    let edit = newline_indent("\tx = [", "]", TypedChars::last('['), LexState::CODE, &js());
    assert_eq!(edit.indent, 1);
    assert_eq!(edit.text(), "\tx = [\n\t]");
    assert_eq!(edit.caret(), 8);
}
