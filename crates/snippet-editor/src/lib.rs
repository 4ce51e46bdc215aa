#![warn(missing_docs)]
//! Snippet Editor - Headless Editing Engine for Script Snippets
//!
//! # Overview
//!
//! `snippet-editor` is the logic behind a small embedded code editor: the part that decides where
//! the caret is, what undo does, which bracket matches which, and how a snippet is indented. It
//! never touches a rendering surface. The host hands in a flat text buffer and caret requests and
//! gets back updated text, caret coordinates and undo/redo availability.
//!
//! # Core Features
//!
//! - **Tab-aware carets**: character offset <-> `(line, visual column)` with fixed-width tabs
//! - **Debounced history**: per-page undo/redo that coalesces bursts of typing
//! - **Bracket-aware indentation**: whole-buffer beautify and Enter auto-indent that skip strings
//!   and comments
//! - **Bracket matching**: select the span between a bracket and its complement
//! - **Pages**: several named buffers, each with its own history
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  EditorSession (config, pages, typed chars) │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Page Container                             │  ← Named buffers
//! ├──────────────────────┬──────────────────────┤
//! │  History Manager     │  Indentation Engine  │  ← Edit semantics
//! ├──────────────────────┼──────────────────────┤
//! │  Bracket-Match       │  Bracket Lexer       │  ← Bracket logic
//! ├──────────────────────┴──────────────────────┤
//! │  Position Model / Line Index (Rope-based)   │  ← Coordinates
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use std::time::Instant;
//! use snippet_editor::{EditorConfig, EditorSession};
//!
//! let now = Instant::now();
//! let mut session = EditorSession::with_content("a{b[c]d}e", EditorConfig::default());
//!
//! session.set_caret_offset(2);
//! assert_eq!(session.select_matching_bracket(), Some(1..8));
//!
//! session.replace_content("if (a) {\nb();\n}", 0, now);
//! session.beautify(now);
//! assert_eq!(session.text(), "if (a) {\n\tb();\n}");
//! ```
//!
//! # Module Description
//!
//! - [`position`] - Position Model (offset <-> line/visual column)
//! - [`line_index`] - Rope based line index
//! - [`lexer`] - Bracket Lexer (strings, comments, bracket depth)
//! - [`indent`] - Indentation Engine (beautify, Enter auto-indent)
//! - [`history`] - History Manager (debounced undo/redo)
//! - [`bracket_match`] - Bracket-Match Selector
//! - [`pages`] - Page Container
//! - [`session`] - Editor session tying everything together
//! - [`config`] - Configuration

pub mod bracket_match;
pub mod config;
pub mod history;
pub mod indent;
pub mod lexer;
pub mod line_index;
pub mod pages;
pub mod position;
pub mod session;

pub use bracket_match::{find_matching_bracket, select_bracket_span};
pub use config::{ConfigError, EditorConfig};
pub use history::{History, HistoryState, Snapshot};
pub use indent::{
    NewlineEdit, TypedChars, beautify, beautify_with_caret, insert_newline, newline_indent,
};
pub use lexer::{CharClass, LexState, LineScan, scan_line, scan_lines};
pub use line_index::LineIndex;
pub use pages::{Page, PageChange, PageChangeCallback, PageContainer, PageError};
pub use position::{Caret, TextMetrics, WidthMode, caret_at, caret_to_offset, offset_to_caret};
pub use session::EditorSession;
pub use snippet_editor_lang::{BracketPair, CommentConfig, LanguageConfig};
