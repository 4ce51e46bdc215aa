//! Bracket Lexer
//!
//! Scans one line at a time, classifying characters as code, string, block comment or line
//! comment, and counting the indentation brackets that appear in *code* only.
//!
//! Strings and block comments may span lines, so the scanner takes the [`LexState`] left behind by
//! the previous line and returns the state for the next one.

use snippet_editor_lang::LanguageConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lexical state carried from one line to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LexState {
    /// Delimiter of the string literal currently open, if any.
    pub string_delim: Option<char>,
    /// Whether a block comment is currently open.
    pub in_block_comment: bool,
}

impl LexState {
    /// Plain code: no open string or comment.
    pub const CODE: LexState = LexState {
        string_delim: None,
        in_block_comment: false,
    };

    /// Whether a string literal is open.
    pub fn in_string(&self) -> bool {
        self.string_delim.is_some()
    }

    /// Whether the state is plain code.
    pub fn is_code(&self) -> bool {
        !self.in_string() && !self.in_block_comment
    }
}

/// Lexical class of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Ordinary code.
    Code,
    /// Inside a string literal, delimiters included.
    InString,
    /// Inside a block comment, markers included.
    InBlockComment,
    /// Part of a line comment (marker through end of line).
    LineComment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BracketSide {
    Open,
    Close,
}

/// Result of scanning one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineScan {
    /// State to feed into the next line.
    pub final_state: LexState,
    /// Openers minus closers found in code (unclamped).
    pub net_delta: isize,
    classes: Vec<CharClass>,
    brackets: Vec<(usize, BracketSide)>,
}

impl LineScan {
    /// Number of code openers at character indices strictly before `idx`.
    pub fn openers_before(&self, idx: usize) -> usize {
        self.count_before(idx, BracketSide::Open)
    }

    /// Number of code closers at character indices strictly before `idx`.
    pub fn closers_before(&self, idx: usize) -> usize {
        self.count_before(idx, BracketSide::Close)
    }

    /// Lexical class of the character at `idx`, if it exists.
    pub fn class_at(&self, idx: usize) -> Option<CharClass> {
        self.classes.get(idx).copied()
    }

    fn count_before(&self, idx: usize, side: BracketSide) -> usize {
        self.brackets
            .iter()
            .filter(|(i, s)| *i < idx && *s == side)
            .count()
    }
}

fn token_chars(token: Option<&str>) -> Option<Vec<char>> {
    token
        .filter(|t| !t.is_empty())
        .map(|t| t.chars().collect())
}

fn token_at(chars: &[char], i: usize, token: Option<&[char]>) -> Option<usize> {
    let token = token?;
    chars[i..].starts_with(token).then_some(token.len())
}

/// Scan `line` starting from `initial`.
pub fn scan_line(line: &str, initial: LexState, lang: &LanguageConfig) -> LineScan {
    let chars: Vec<char> = line.chars().collect();
    let line_comment = lang
        .comments
        .has_line()
        .then(|| token_chars(lang.comments.line.as_deref()))
        .flatten();
    let (block_start, block_end) = if lang.comments.has_block() {
        (
            token_chars(lang.comments.block_start.as_deref()),
            token_chars(lang.comments.block_end.as_deref()),
        )
    } else {
        (None, None)
    };

    let mut state = initial;
    let mut classes = Vec::with_capacity(chars.len());
    let mut brackets = Vec::new();
    let mut net_delta = 0isize;
    let mut escaped = false;

    let mut i = 0usize;
    while i < chars.len() {
        let ch = chars[i];

        if let Some(delim) = state.string_delim {
            classes.push(CharClass::InString);
            if escaped {
                escaped = false;
            } else if lang.escape == Some(ch) {
                escaped = true;
            } else if ch == delim {
                state.string_delim = None;
            }
            i += 1;
            continue;
        }

        if state.in_block_comment {
            if let Some(len) = token_at(&chars, i, block_end.as_deref()) {
                classes.extend(std::iter::repeat_n(CharClass::InBlockComment, len));
                state.in_block_comment = false;
                i += len;
            } else {
                classes.push(CharClass::InBlockComment);
                i += 1;
            }
            continue;
        }

        if token_at(&chars, i, line_comment.as_deref()).is_some() {
            classes.extend(std::iter::repeat_n(CharClass::LineComment, chars.len() - i));
            break;
        }

        if let Some(len) = token_at(&chars, i, block_start.as_deref()) {
            classes.extend(std::iter::repeat_n(CharClass::InBlockComment, len));
            state.in_block_comment = true;
            i += len;
            continue;
        }

        if lang.is_quote(ch) {
            classes.push(CharClass::InString);
            state.string_delim = Some(ch);
            escaped = false;
            i += 1;
            continue;
        }

        if lang.is_indent_opener(ch) {
            brackets.push((i, BracketSide::Open));
            net_delta += 1;
        } else if lang.is_indent_closer(ch) {
            brackets.push((i, BracketSide::Close));
            net_delta -= 1;
        }
        classes.push(CharClass::Code);
        i += 1;
    }

    LineScan {
        final_state: state,
        net_delta,
        classes,
        brackets,
    }
}

/// Thread [`scan_line`] across `lines`, returning the state after the last one.
pub fn scan_lines<'a, I>(lines: I, initial: LexState, lang: &LanguageConfig) -> LexState
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .fold(initial, |state, line| scan_line(line, state, lang).final_state)
}
