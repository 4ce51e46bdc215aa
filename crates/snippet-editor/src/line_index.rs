//! Logical Line Index
//!
//! Locates lines by character offset using a Rope, supporting O(log N) line access.
//!
//! The rope is built without CR/Unicode line-break recognition, so only `'\n'` separates lines.
//! `N` newlines always yield `N + 1` lines, matching `str::split('\n')`.

use ropey::Rope;

/// Logical line index over a snippet buffer.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build line index from text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get total line count
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Character offset of the first character of `line` (clamped to the end of the text).
    pub fn line_start(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(line)
    }

    /// Character length of `line`, excluding its newline.
    pub fn line_len(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(line);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Get line number and offset within line from character offset
    pub fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize) {
        let char_offset = char_offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_offset);
        (line, char_offset - self.rope.line_to_char(line))
    }

    /// Get text of the specified line (excluding newline)
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }

        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        Some(text)
    }

    /// Text of all lines strictly before `line`, one entry per line.
    pub fn lines_before(&self, line: usize) -> Vec<String> {
        (0..line.min(self.rope.len_lines()))
            .filter_map(|l| self.line_text(l))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_index() {
        let index = LineIndex::default();
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.char_count(), 0);
    }

    #[test]
    fn test_line_count_matches_split() {
        for text in ["", "a", "a\n", "a\nb", "\n\n", "a\r\nb"] {
            let index = LineIndex::from_text(text);
            assert_eq!(index.line_count(), text.split('\n').count(), "{text:?}");
        }
    }

    #[test]
    fn test_carriage_return_is_not_a_line_break() {
        let index = LineIndex::from_text("a\rb\nc");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_text(0).as_deref(), Some("a\rb"));
    }

    #[test]
    fn test_char_offset_to_position() {
        let index = LineIndex::from_text("ABC\nDEF\nGHI");

        assert_eq!(index.char_offset_to_position(0), (0, 0));
        assert_eq!(index.char_offset_to_position(3), (0, 3));
        assert_eq!(index.char_offset_to_position(4), (1, 0));
        assert_eq!(index.char_offset_to_position(8), (2, 0));
        assert_eq!(index.char_offset_to_position(100), (2, 3));
    }

    #[test]
    fn test_utf8_cjk() {
        let index = LineIndex::from_text("你好\n世界");

        assert_eq!(index.char_count(), 5);
        assert_eq!(index.line_len(0), 2);
        assert_eq!(index.line_start(1), 3);
        assert_eq!(index.char_offset_to_position(4), (1, 1));
    }

    #[test]
    fn test_lines_before() {
        let index = LineIndex::from_text("a\nb\nc");
        assert_eq!(index.lines_before(2), vec!["a".to_string(), "b".to_string()]);
        assert!(index.lines_before(0).is_empty());
    }
}
