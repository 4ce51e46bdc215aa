//! Indentation Engine
//!
//! Two bracket-driven operations built on the [`lexer`](crate::lexer):
//!
//! - [`beautify`]: recompute the indentation of every line of a buffer, one tab per open bracket.
//! - [`insert_newline`]: split the caret line on Enter and indent the new line.
//!
//! Neither operation parses the language. Indentation comes from net bracket depth, with strings
//! and comments skipped by the lexer, plus a couple of closing-bracket heuristics.
//!
//! # Example
//!
//! ```rust
//! use snippet_editor::indent::beautify;
//! use snippet_editor_lang::LanguageConfig;
//!
//! let lang = LanguageConfig::javascript();
//! let out = beautify("if (a) {\nb();\n}", &lang);
//! assert_eq!(out, "if (a) {\n\tb();\n}");
//! ```

use crate::lexer::{CharClass, LexState, scan_line, scan_lines};
use crate::line_index::LineIndex;
use snippet_editor_lang::LanguageConfig;
use tracing::trace;

/// The last one or two characters typed by the user, most recent first.
///
/// Used by [`newline_indent`] to decide whether a just-typed closing bracket should un-nest the
/// next line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypedChars {
    /// Most recently typed character.
    pub last: Option<char>,
    /// Character typed before `last`.
    pub second_last: Option<char>,
}

impl TypedChars {
    /// Hints with only the most recent character.
    pub fn last(ch: char) -> Self {
        Self {
            last: Some(ch),
            second_last: None,
        }
    }

    /// Record a newly typed character.
    pub fn push(&mut self, ch: char) {
        self.second_last = self.last;
        self.last = Some(ch);
    }

    /// Forget both characters.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn any(&self, pred: impl Fn(char) -> bool) -> bool {
        self.last.is_some_and(&pred) || self.second_last.is_some_and(&pred)
    }
}

/// One emitted line of a beautify pass, with what is needed to map a caret through it.
#[derive(Debug, Clone)]
struct BeautifiedLine {
    text: String,
    /// Emitted unmodified (block comment body).
    raw: bool,
    /// Leading whitespace characters removed from the input line.
    old_lead: usize,
    /// Tabs emitted in front of the content.
    new_lead: usize,
    /// Characters of trimmed content.
    content_len: usize,
}

impl BeautifiedLine {
    fn map_column(&self, column: usize) -> usize {
        if self.raw {
            return column.min(self.text.chars().count());
        }
        if column <= self.old_lead {
            self.new_lead
        } else {
            self.new_lead + (column - self.old_lead).min(self.content_len)
        }
    }
}

fn beautify_lines(text: &str, lang: &LanguageConfig) -> Vec<BeautifiedLine> {
    let mut out = Vec::new();
    let mut level = 0isize;
    let mut state = LexState::CODE;

    for line in text.split('\n') {
        let trimmed = line.trim();
        let old_lead = line.chars().count() - line.trim_start().chars().count();
        if trimmed.is_empty() {
            out.push(BeautifiedLine {
                text: String::new(),
                raw: false,
                old_lead,
                new_lead: 0,
                content_len: 0,
            });
            continue;
        }

        let mut rest = trimmed;
        if state.is_code()
            && let Some(first) = trimmed.chars().next()
            && lang.is_indent_closer(first)
        {
            level = (level - 1).max(0);
            rest = &trimmed[first.len_utf8()..];
        }

        let emitted = if state.in_block_comment {
            BeautifiedLine {
                text: line.to_string(),
                raw: true,
                old_lead,
                new_lead: old_lead,
                content_len: trimmed.chars().count(),
            }
        } else {
            let new_lead = level as usize;
            let mut text = "\t".repeat(new_lead);
            text.push_str(trimmed);
            BeautifiedLine {
                text,
                raw: false,
                old_lead,
                new_lead,
                content_len: trimmed.chars().count(),
            }
        };
        out.push(emitted);

        let scan = scan_line(rest, state, lang);
        level = (level + scan.net_delta).max(0);
        state = scan.final_state;
    }

    out
}

/// Re-indent every line of `text` with tabs according to bracket depth.
///
/// - Blank lines become empty.
/// - A line starting with a closing bracket (in code) is emitted one level shallower.
/// - Lines inside a block comment that started on an earlier line are kept verbatim.
///
/// The line count never changes, and `beautify(&beautify(x)) == beautify(x)`.
pub fn beautify(text: &str, lang: &LanguageConfig) -> String {
    let lines: Vec<String> = beautify_lines(text, lang)
        .into_iter()
        .map(|l| l.text)
        .collect();
    lines.join("\n")
}

/// [`beautify`] and map `caret_offset` onto the re-indented text.
///
/// The caret stays on its line and keeps its position relative to the line's trimmed content; a
/// caret inside the old indentation lands at the start of the content.
pub fn beautify_with_caret(
    text: &str,
    caret_offset: usize,
    lang: &LanguageConfig,
) -> (String, usize) {
    let index = LineIndex::from_text(text);
    let (caret_line, caret_column) = index.char_offset_to_position(caret_offset);
    let lines = beautify_lines(text, lang);

    let mut new_offset = 0usize;
    for line in lines.iter().take(caret_line) {
        new_offset += line.text.chars().count() + 1;
    }
    if let Some(line) = lines.get(caret_line) {
        new_offset += line.map_column(caret_column);
    }

    let joined: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    (joined.join("\n"), new_offset)
}

/// The caret line after pressing Enter: `before`, a newline, `indent` tabs, then `after`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewlineEdit {
    /// Content left on the original line.
    pub before: String,
    /// Tabs in front of the new line's content.
    pub indent: usize,
    /// Content moved to the new line, leading spaces/tabs removed.
    pub after: String,
}

impl NewlineEdit {
    /// Assemble the replacement for the original line.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.before.len() + self.indent + self.after.len() + 1);
        out.push_str(&self.before);
        out.push('\n');
        out.extend(std::iter::repeat_n('\t', self.indent));
        out.push_str(&self.after);
        out
    }

    /// Caret offset relative to the start of [`NewlineEdit::text`]: after the new indentation.
    pub fn caret(&self) -> usize {
        self.before.chars().count() + 1 + self.indent
    }
}

/// Indent the line created by pressing Enter between `before` and `after`.
///
/// `entry_state` is the lexical state at the start of the caret line, so strings and comments
/// opened on earlier lines are honoured.
pub fn newline_indent(
    before: &str,
    after: &str,
    typed: TypedChars,
    entry_state: LexState,
    lang: &LanguageConfig,
) -> NewlineEdit {
    let base = before.chars().take_while(|c| *c == '\t').count() as isize;
    let scan = scan_line(before, entry_state, lang);
    let before_len = before.chars().count();

    let trimmed_before = before.trim_end_matches([' ', '\t']);
    let last_idx = trimmed_before.chars().count();
    let ends_with_opener = trimmed_before
        .chars()
        .last()
        .is_some_and(|c| lang.is_indent_opener(c))
        && last_idx > 0
        && scan.class_at(last_idx - 1) == Some(CharClass::Code);

    let mut level = base;
    if typed.any(|c| lang.is_indent_closer(c)) || ends_with_opener {
        level += scan.openers_before(before_len) as isize - scan.closers_before(before_len) as isize;
    }

    let after = after.trim_start_matches([' ', '\t']);
    if scan.final_state.is_code() && after.chars().next().is_some_and(|c| lang.is_indent_closer(c))
    {
        level = (level - 1).max(0);
    }

    let mut before_out = before.to_string();
    if let Some(closer) = typed.last.filter(|c| lang.is_indent_closer(*c)) {
        let mut chars = before.chars();
        if chars.next() == Some('\t') && chars.next() == Some(closer) && chars.next().is_none() {
            before_out = closer.to_string();
        }
    }

    let indent = level.max(0) as usize;
    trace!(base, indent, ends_with_opener, "newline indent");
    NewlineEdit {
        before: before_out,
        indent,
        after: after.to_string(),
    }
}

/// Press Enter at `caret_offset` in `text`.
///
/// Returns the new text and the caret offset, placed after the new line's indentation.
pub fn insert_newline(
    text: &str,
    caret_offset: usize,
    typed: TypedChars,
    lang: &LanguageConfig,
) -> (String, usize) {
    let index = LineIndex::from_text(text);
    let (line, column) = index.char_offset_to_position(caret_offset);
    let line_text = index.line_text(line).unwrap_or_default();
    let before: String = line_text.chars().take(column).collect();
    let after: String = line_text.chars().skip(column).collect();

    let preceding = index.lines_before(line);
    let entry_state = scan_lines(preceding.iter().map(String::as_str), LexState::CODE, lang);
    let edit = newline_indent(&before, &after, typed, entry_state, lang);

    let line_start = index.line_start(line);
    let line_end = line_start + index.line_len(line);
    let mut out: String = text.chars().take(line_start).collect();
    out.push_str(&edit.text());
    out.extend(text.chars().skip(line_end));

    (out, line_start + edit.caret())
}
