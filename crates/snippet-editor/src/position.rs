//! Position Model
//!
//! Converts between a linear character offset and a `(line, visual column)` pair.
//!
//! Both `line` and `column` are 1-based. The column is *visual*: a tab adds a fixed number of
//! cells (`tab_width`) and every other character adds its cell width (1 in
//! [`WidthMode::Chars`], its UAX #11 width in [`WidthMode::Unicode`]).
//!
//! # Example
//!
//! ```rust
//! use snippet_editor::position::{TextMetrics, caret_to_offset, offset_to_caret};
//!
//! let metrics = TextMetrics::default();
//! let caret = offset_to_caret("\t\tX", 2, metrics);
//! assert_eq!((caret.line, caret.column), (1, 9));
//! assert_eq!(caret_to_offset("\t\tX", 1, 9, metrics), 2);
//! ```

use crate::line_index::LineIndex;
use unicode_width::UnicodeWidthChar;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default tab width (in cells) used when a caller does not specify a tab width.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// How non-tab characters are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WidthMode {
    /// Every non-tab character occupies one cell.
    #[default]
    Chars,
    /// Characters occupy their UAX #11 width (CJK = 2, combining marks = 0).
    Unicode,
}

/// Measurement settings for visual columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextMetrics {
    /// Cells added by one `'\t'`.
    pub tab_width: usize,
    /// Width policy for every other character.
    pub width_mode: WidthMode,
}

impl TextMetrics {
    /// Metrics with the given tab width and [`WidthMode::Chars`].
    pub fn with_tab_width(tab_width: usize) -> Self {
        Self {
            tab_width: tab_width.max(1),
            width_mode: WidthMode::Chars,
        }
    }

    /// Visual width of a single character.
    pub fn char_width(&self, ch: char) -> usize {
        if ch == '\t' {
            return self.tab_width.max(1);
        }
        match self.width_mode {
            WidthMode::Chars => 1,
            WidthMode::Unicode => UnicodeWidthChar::width(ch).unwrap_or(1),
        }
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::with_tab_width(DEFAULT_TAB_WIDTH)
    }
}

/// Caret location in both coordinate systems.
///
/// For a given buffer, `char_index` and `(line, column)` always describe the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Caret {
    /// 1-based line number.
    pub line: usize,
    /// 1-based visual column.
    pub column: usize,
    /// 0-based character offset into the buffer.
    pub char_index: usize,
}

impl Caret {
    /// The caret at the very start of any buffer.
    pub const fn origin() -> Self {
        Self {
            line: 1,
            column: 1,
            char_index: 0,
        }
    }
}

impl Default for Caret {
    fn default() -> Self {
        Self::origin()
    }
}

/// Convert a character offset into a [`Caret`].
///
/// `offset` is clamped to the length of `text`.
pub fn offset_to_caret(text: &str, offset: usize, metrics: TextMetrics) -> Caret {
    let mut line = 1usize;
    let mut column = 1usize;
    let mut char_index = 0usize;

    for ch in text.chars().take(offset) {
        char_index += 1;
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column = column.saturating_add(metrics.char_width(ch));
        }
    }

    Caret {
        line,
        column,
        char_index,
    }
}

/// Convert a 1-based `(line, visual column)` into a character offset.
///
/// - A `line` past the last line resolves to the end of the text.
/// - A `column` past the end of its line resolves to the end of that line.
/// - A `column` that falls inside a wide character (e.g. a tab) resolves to the first offset whose
///   column reaches or exceeds the request.
pub fn caret_to_offset(text: &str, line: usize, column: usize, metrics: TextMetrics) -> usize {
    let index = LineIndex::from_text(text);
    let line = line.max(1);
    if line > index.line_count() {
        return index.char_count();
    }

    let line_start = index.line_start(line - 1);
    let line_text = index.line_text(line - 1).unwrap_or_default();

    let mut x = 1usize;
    for (i, ch) in line_text.chars().enumerate() {
        if x >= column {
            return line_start + i;
        }
        x = x.saturating_add(metrics.char_width(ch));
    }
    line_start + index.line_len(line - 1)
}

/// Build a consistent [`Caret`] from a `(line, column)` request, clamping as [`caret_to_offset`].
pub fn caret_at(text: &str, line: usize, column: usize, metrics: TextMetrics) -> Caret {
    let offset = caret_to_offset(text, line, column, metrics);
    offset_to_caret(text, offset, metrics)
}
