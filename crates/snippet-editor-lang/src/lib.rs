#![warn(missing_docs)]
//! `snippet-editor-lang` - data-driven language configuration for `snippet-editor`.
//!
//! This crate stays lightweight and does **not** parse anything. It describes the handful of
//! lexical tokens the editing engine needs to re-indent and bracket-match a snippet: comment
//! markers, string quotes, the escape character and bracket pairs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Comment tokens for a given language.
///
/// The bracket lexer uses these to skip brackets that appear inside comments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommentConfig {
    /// Line comment token (e.g. `//`, `#`).
    pub line: Option<String>,
    /// Block comment start token (e.g. `/*`).
    pub block_start: Option<String>,
    /// Block comment end token (e.g. `*/`).
    pub block_end: Option<String>,
}

impl CommentConfig {
    /// Create a config that supports only line comments.
    pub fn line(token: impl Into<String>) -> Self {
        Self {
            line: Some(token.into()),
            block_start: None,
            block_end: None,
        }
    }

    /// Create a config that supports only block comments.
    pub fn block(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            line: None,
            block_start: Some(start.into()),
            block_end: Some(end.into()),
        }
    }

    /// Create a config that supports both line and block comments.
    pub fn line_and_block(
        line: impl Into<String>,
        block_start: impl Into<String>,
        block_end: impl Into<String>,
    ) -> Self {
        Self {
            line: Some(line.into()),
            block_start: Some(block_start.into()),
            block_end: Some(block_end.into()),
        }
    }

    /// Returns `true` if a line comment token is configured.
    pub fn has_line(&self) -> bool {
        self.line.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Returns `true` if both block comment tokens are configured.
    pub fn has_block(&self) -> bool {
        self.block_start.as_deref().is_some_and(|s| !s.is_empty())
            && self.block_end.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// An opening/closing bracket pair such as `{` / `}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BracketPair {
    /// Opening bracket.
    pub open: char,
    /// Closing bracket.
    pub close: char,
}

impl BracketPair {
    /// Create a new bracket pair.
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    /// Return the complement of `ch` if it belongs to this pair.
    pub fn complement(&self, ch: char) -> Option<char> {
        if ch == self.open {
            Some(self.close)
        } else if ch == self.close {
            Some(self.open)
        } else {
            None
        }
    }
}

/// `{}`
pub const BRACES: BracketPair = BracketPair::new('{', '}');
/// `[]`
pub const SQUARE: BracketPair = BracketPair::new('[', ']');
/// `()`
pub const PARENS: BracketPair = BracketPair::new('(', ')');
/// `<>`
pub const ANGLE: BracketPair = BracketPair::new('<', '>');

/// Lexical description of a snippet language.
///
/// `indent_pairs` drive indentation depth; `match_pairs` drive bracket-match selection. They
/// differ by default because `<`/`>` are comparison operators far more often than brackets,
/// so they are matched on request but never counted for indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LanguageConfig {
    /// Comment tokens.
    pub comments: CommentConfig,
    /// Characters that open (and close) a string literal.
    pub quotes: Vec<char>,
    /// Escape character inside string literals.
    pub escape: Option<char>,
    /// Pairs counted for indentation depth.
    pub indent_pairs: Vec<BracketPair>,
    /// Pairs considered by bracket-match selection.
    pub match_pairs: Vec<BracketPair>,
}

impl LanguageConfig {
    /// C-family / JavaScript style snippets: `//`, `/* */`, `'` `"` `` ` `` and `\` escapes.
    pub fn javascript() -> Self {
        Self {
            comments: CommentConfig::line_and_block("//", "/*", "*/"),
            quotes: vec!['\'', '"', '`'],
            escape: Some('\\'),
            indent_pairs: vec![BRACES, SQUARE, PARENS],
            match_pairs: vec![BRACES, SQUARE, PARENS, ANGLE],
        }
    }

    /// Returns `true` if `ch` starts a string literal.
    pub fn is_quote(&self, ch: char) -> bool {
        self.quotes.contains(&ch)
    }

    /// Returns `true` if `ch` opens an indentation pair.
    pub fn is_indent_opener(&self, ch: char) -> bool {
        self.indent_pairs.iter().any(|p| p.open == ch)
    }

    /// Returns `true` if `ch` closes an indentation pair.
    pub fn is_indent_closer(&self, ch: char) -> bool {
        self.indent_pairs.iter().any(|p| p.close == ch)
    }

    /// Look up the match pair `ch` belongs to, if any.
    pub fn match_pair_for(&self, ch: char) -> Option<BracketPair> {
        self.match_pairs
            .iter()
            .copied()
            .find(|p| p.open == ch || p.close == ch)
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self::javascript()
    }
}
