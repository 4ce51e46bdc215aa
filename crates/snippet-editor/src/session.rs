//! Editor Session
//!
//! [`EditorSession`] is the single entry point a host drives: it owns the configuration, the
//! pages (each with its own history), and the last-typed-character hints, and exposes every edit
//! operation in terms of plain text and caret offsets.
//!
//! The host keeps its view in sync by reading [`EditorSession::text`],
//! [`EditorSession::caret`] and [`EditorSession::history_state`] after each call, and calls
//! [`EditorSession::poll`] from its event loop so debounced history commits fire.
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use snippet_editor::{EditorConfig, EditorSession};
//!
//! let t0 = Instant::now();
//! let mut session = EditorSession::new(EditorConfig::default());
//! for ch in "if (x) {".chars() {
//!     session.type_char(ch, t0);
//! }
//! session.insert_newline(t0);
//! assert_eq!(session.text(), "if (x) {\n\t");
//! assert_eq!(session.caret().column, 5);
//!
//! session.poll(t0 + Duration::from_secs(1));
//! session.undo();
//! assert_eq!(session.text(), "if (x) {");
//! ```

use crate::bracket_match::select_bracket_span;
use crate::config::EditorConfig;
use crate::history::{HistoryState, Snapshot};
use crate::indent::{TypedChars, beautify_with_caret, insert_newline};
use crate::pages::{PageChange, PageContainer, PageError};
use crate::position::{Caret, caret_at, offset_to_caret};
use std::ops::Range;
use std::time::Instant;
use tracing::debug;

/// An editing session over one or more pages.
pub struct EditorSession {
    config: EditorConfig,
    pages: PageContainer,
    typed: TypedChars,
}

impl EditorSession {
    /// A session with a single empty page.
    pub fn new(config: EditorConfig) -> Self {
        let pages = PageContainer::new(config.history_limit, config.debounce());
        Self {
            config,
            pages,
            typed: TypedChars::default(),
        }
    }

    /// A session whose single page starts with `content`.
    pub fn with_content(content: &str, config: EditorConfig) -> Self {
        let mut session = Self::new(config);
        session.load_content(content);
        session
    }

    /// Active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replace the configuration; history limits and debounce apply to every page.
    pub fn set_config(&mut self, config: EditorConfig) {
        self.pages
            .set_history_settings(config.history_limit, config.debounce());
        self.config = config;
    }

    /// Text of the active page.
    pub fn text(&self) -> &str {
        self.pages.active().content()
    }

    /// Caret of the active page.
    pub fn caret(&self) -> Caret {
        self.pages.active().snapshot().caret
    }

    /// Undo/redo availability of the active page.
    pub fn history_state(&self) -> HistoryState {
        self.pages.active().history().state()
    }

    /// Last-typed-character hints used by [`EditorSession::insert_newline`].
    pub fn typed_chars(&self) -> TypedChars {
        self.typed
    }

    /// Record a typed character without editing (for hosts that apply keystrokes themselves).
    pub fn note_typed(&mut self, ch: char) {
        self.typed.push(ch);
    }

    /// Move the caret to a character offset (clamped).
    pub fn set_caret_offset(&mut self, offset: usize) -> Caret {
        let caret = offset_to_caret(self.text(), offset, self.config.metrics());
        self.pages.active_mut().history_mut().set_caret(caret);
        caret
    }

    /// Move the caret to a 1-based `(line, visual column)` (clamped).
    pub fn set_caret_position(&mut self, line: usize, column: usize) -> Caret {
        let caret = caret_at(self.text(), line, column, self.config.metrics());
        self.pages.active_mut().history_mut().set_caret(caret);
        caret
    }

    /// Type one character at the caret.
    ///
    /// `'\n'` and `'\t'` are structural edits and go through [`EditorSession::insert_newline`] and
    /// [`EditorSession::insert_tab`]; everything else is an ordinary, debounced keystroke.
    pub fn type_char(&mut self, ch: char, now: Instant) -> Caret {
        match ch {
            '\n' => self.insert_newline(now),
            '\t' => self.insert_tab(now),
            _ => {
                let mut buf = [0u8; 4];
                let (text, caret) = self.insert_at_caret(ch.encode_utf8(&mut buf));
                self.typed.push(ch);
                self.commit(text, caret, false, now)
            }
        }
    }

    /// Apply a host-side edit that produced `text` with the caret at `caret_offset` (debounced).
    pub fn apply_edit(&mut self, text: &str, caret_offset: usize, now: Instant) -> Caret {
        self.commit(text.to_string(), caret_offset, false, now)
    }

    /// Replace the content programmatically; committed to history immediately.
    pub fn replace_content(&mut self, text: &str, caret_offset: usize, now: Instant) -> Caret {
        self.typed.clear();
        self.commit(text.to_string(), caret_offset, true, now)
    }

    /// Load new content into the active page, discarding its history.
    pub fn load_content(&mut self, text: &str) {
        self.typed.clear();
        self.pages.active_mut().history_mut().reset(text);
    }

    /// Insert `text` at the caret; committed immediately.
    pub fn paste(&mut self, text: &str, now: Instant) -> Caret {
        let (content, caret) = self.insert_at_caret(text);
        self.typed.clear();
        self.commit(content, caret, true, now)
    }

    /// Insert a tab at the caret; committed immediately.
    pub fn insert_tab(&mut self, now: Instant) -> Caret {
        let (content, caret) = self.insert_at_caret("\t");
        self.typed.push('\t');
        self.commit(content, caret, true, now)
    }

    /// Press Enter: split the caret line and auto-indent the new one; committed immediately.
    pub fn insert_newline(&mut self, now: Instant) -> Caret {
        let (content, caret) = insert_newline(
            self.text(),
            self.caret().char_index,
            self.typed,
            &self.config.language,
        );
        self.typed.push('\n');
        self.commit(content, caret, true, now)
    }

    /// Re-indent the whole page. Returns `false` (and records nothing) if nothing changed.
    pub fn beautify(&mut self, now: Instant) -> bool {
        let (content, caret) =
            beautify_with_caret(self.text(), self.caret().char_index, &self.config.language);
        if content == self.text() {
            self.set_caret_offset(caret);
            return false;
        }
        debug!(page = self.pages.active_index(), "beautify");
        self.commit(content, caret, true, now);
        true
    }

    /// Undo on the active page. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.typed.clear();
        self.pages.active_mut().history_mut().undo().is_some()
    }

    /// Redo on the active page. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.typed.clear();
        self.pages.active_mut().history_mut().redo().is_some()
    }

    /// Fire the active page's debounce timer if due. Returns `true` if history changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.pages.active_mut().history_mut().poll(now)
    }

    /// When the host should call [`EditorSession::poll`] next, if a commit is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.pages.active().history().deadline()
    }

    /// Span covering the bracket next to the caret and its match, if any.
    pub fn select_matching_bracket(&self) -> Option<Range<usize>> {
        select_bracket_span(
            self.text(),
            self.caret().char_index,
            &self.config.language.match_pairs,
        )
    }

    /// The page container.
    pub fn pages(&self) -> &PageContainer {
        &self.pages
    }

    /// The page container, mutably (titles, add/remove, notifications).
    pub fn pages_mut(&mut self) -> &mut PageContainer {
        &mut self.pages
    }

    /// Activate page `index` and return its restored caret.
    pub fn switch_page(&mut self, index: usize) -> Result<Caret, PageError> {
        let caret = self.pages.switch_to(index)?.caret;
        self.typed.clear();
        Ok(caret)
    }

    /// Replace all pages (title, content), discarding all history.
    pub fn replace_all_pages<I, T, C>(&mut self, pages: I)
    where
        I: IntoIterator<Item = (T, C)>,
        T: Into<String>,
        C: Into<String>,
    {
        self.typed.clear();
        self.pages.replace_all_pages(pages);
    }

    /// Subscribe to page-change notifications.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&PageChange) + Send + 'static,
    {
        self.pages.subscribe(callback);
    }

    /// Suppress page-change notifications during programmatic bulk loads.
    pub fn set_initializing(&mut self, initializing: bool) {
        self.pages.set_initializing(initializing);
    }

    fn insert_at_caret(&self, insert: &str) -> (String, usize) {
        let text = self.text();
        let at = self.caret().char_index;
        let mut out: String = text.chars().take(at).collect();
        out.push_str(insert);
        out.extend(text.chars().skip(at));
        (out, at + insert.chars().count())
    }

    fn commit(&mut self, content: String, caret_offset: usize, force: bool, now: Instant) -> Caret {
        let caret = offset_to_caret(&content, caret_offset, self.config.metrics());
        self.pages
            .active_mut()
            .history_mut()
            .record_edit(Snapshot::new(content, caret), force, now);
        caret
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
