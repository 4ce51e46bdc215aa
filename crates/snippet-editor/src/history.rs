//! History Manager
//!
//! Per-page undo/redo stacks of `(content, caret)` [`Snapshot`]s with debounced coalescing.
//!
//! Ordinary keystrokes are *not* committed one by one. The first keystroke after a commit
//! remembers the pre-edit snapshot and arms a single-shot debounce deadline; every further
//! keystroke pushes the deadline back. When the caller's event loop calls [`History::poll`] after
//! the deadline, the remembered pre-edit snapshot is committed, so a burst of typing undoes as one
//! step.
//!
//! Forced edits (paste, programmatic replace, tab/newline insertion) commit immediately.
//!
//! Time is passed in explicitly, so hosts drive the timer from their own loop and tests stay
//! deterministic.
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use snippet_editor::history::{History, Snapshot};
//! use snippet_editor::position::Caret;
//!
//! let t0 = Instant::now();
//! let mut history = History::new("", 20, Duration::from_millis(300));
//! history.record_edit(Snapshot::new("a", Caret { line: 1, column: 2, char_index: 1 }), false, t0);
//! history.record_edit(Snapshot::new("ab", Caret { line: 1, column: 3, char_index: 2 }), false, t0);
//! assert!(!history.can_undo());
//!
//! history.poll(t0 + Duration::from_millis(300));
//! assert_eq!(history.undo_depth(), 1);
//! assert_eq!(history.undo().unwrap().content, "");
//! ```

use crate::position::Caret;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of undo entries kept per page.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Default debounce window for ordinary keystrokes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Buffer content together with the caret, as stored on the undo/redo stacks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot {
    /// Full buffer text.
    pub content: String,
    /// Caret within `content`.
    pub caret: Caret,
}

impl Snapshot {
    /// Create a snapshot.
    pub fn new(content: impl Into<String>, caret: Caret) -> Self {
        Self {
            content: content.into(),
            caret,
        }
    }

    /// A snapshot with the caret at the start of the buffer.
    pub fn at_origin(content: impl Into<String>) -> Self {
        Self::new(content, Caret::origin())
    }
}

/// Undo/redo availability, for enabling toolbar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryState {
    /// Can undo
    pub can_undo: bool,
    /// Can redo
    pub can_redo: bool,
    /// Undo stack depth
    pub undo_depth: usize,
    /// Redo stack depth
    pub redo_depth: usize,
    /// Whether a debounced commit is waiting for its deadline.
    pub pending: bool,
}

#[derive(Debug, Clone)]
struct PendingCommit {
    before: Snapshot,
    deadline: Instant,
}

/// Undo/redo history of one page.
///
/// The history also owns the page's *current* state, which is what undo pushes onto the redo
/// stack and what forced edits commit.
#[derive(Debug, Clone)]
pub struct History {
    current: Snapshot,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_undo: usize,
    debounce: Duration,
    pending: Option<PendingCommit>,
}

impl History {
    /// Create an empty history whose current state is `content` with the caret at offset 0.
    pub fn new(content: impl Into<String>, max_undo: usize, debounce: Duration) -> Self {
        Self {
            current: Snapshot::at_origin(content),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo: max_undo.max(1),
            debounce,
            pending: None,
        }
    }

    /// The current `(content, caret)`.
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// Move the caret without creating history.
    pub fn set_caret(&mut self, caret: Caret) {
        self.current.caret = caret;
    }

    /// Replace everything with `content` and forget both stacks (loading new content).
    pub fn reset(&mut self, content: impl Into<String>) {
        self.current = Snapshot::at_origin(content);
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending = None;
    }

    /// Record that the buffer became `next`.
    ///
    /// With `force`, the previous state is committed immediately; a forced edit that leaves the
    /// content unchanged only moves the caret and records nothing. Otherwise the previous state is
    /// remembered (first edit of a burst only) and committed by [`History::poll`] once `debounce`
    /// has passed without another edit.
    pub fn record_edit(&mut self, next: Snapshot, force: bool, now: Instant) {
        if force {
            self.settle();
            if next.content == self.current.content {
                self.current.caret = next.caret;
                return;
            }
            let previous = std::mem::replace(&mut self.current, next);
            self.redo_stack.clear();
            self.commit(previous);
            return;
        }

        if self.pending.is_none() && next.content == self.current.content {
            self.current.caret = next.caret;
            return;
        }

        let deadline = now + self.debounce;
        match &mut self.pending {
            Some(pending) => pending.deadline = deadline,
            None => {
                self.pending = Some(PendingCommit {
                    before: self.current.clone(),
                    deadline,
                });
            }
        }
        self.current = next;
    }

    /// Fire the debounce timer if its deadline has passed. Returns `true` if a snapshot was
    /// committed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.pending.as_ref().is_some_and(|p| p.deadline <= now) {
            self.settle()
        } else {
            false
        }
    }

    /// Commit the pending pre-edit snapshot right away and disarm the timer.
    ///
    /// Returns `true` if a snapshot was committed.
    pub fn settle(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        // Typed and then reverted within one burst.
        if pending.before.content == self.current.content {
            return false;
        }
        self.redo_stack.clear();
        self.commit(pending.before)
    }

    /// Deadline of the armed debounce timer, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Restore the previous snapshot. Returns the new current state, or `None` if there is
    /// nothing to undo.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        self.settle();
        let snapshot = self.undo_stack.pop()?;
        let current = std::mem::replace(&mut self.current, snapshot);
        self.redo_stack.push(current);
        debug!(
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "undo"
        );
        Some(&self.current)
    }

    /// Re-apply the last undone snapshot. Returns the new current state, or `None` if there is
    /// nothing to redo.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        self.settle();
        let snapshot = self.redo_stack.pop()?;
        let current = std::mem::replace(&mut self.current, snapshot);
        self.commit(current);
        debug!(
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "redo"
        );
        Some(&self.current)
    }

    /// Can undo
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Can redo
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo stack depth
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Redo stack depth
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Maximum number of undo entries kept.
    pub fn limit(&self) -> usize {
        self.max_undo
    }

    /// Change the undo limit, evicting the oldest entries if needed.
    pub fn set_limit(&mut self, max_undo: usize) {
        self.max_undo = max_undo.max(1);
        self.evict();
    }

    /// Change the debounce window used for subsequent edits.
    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    /// Snapshot of the availability flags.
    pub fn state(&self) -> HistoryState {
        HistoryState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo_depth: self.undo_depth(),
            redo_depth: self.redo_depth(),
            pending: self.pending.is_some(),
        }
    }

    /// Push `snapshot` onto the undo stack unless it equals the top entry.
    fn commit(&mut self, snapshot: Snapshot) -> bool {
        if self.undo_stack.last() == Some(&snapshot) {
            trace!("skipping identical history snapshot");
            return false;
        }
        self.undo_stack.push(snapshot);
        self.evict();
        trace!(undo_depth = self.undo_stack.len(), "history commit");
        true
    }

    fn evict(&mut self) {
        if self.undo_stack.len() > self.max_undo {
            let excess = self.undo_stack.len() - self.max_undo;
            self.undo_stack.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caret(offset: usize) -> Caret {
        Caret {
            line: 1,
            column: offset + 1,
            char_index: offset,
        }
    }

    fn snap(text: &str) -> Snapshot {
        Snapshot::new(text, caret(text.chars().count()))
    }

    #[test]
    fn test_forced_edit_commits_previous_state() {
        let t0 = Instant::now();
        let mut history = History::new("", 20, DEFAULT_DEBOUNCE);
        history.record_edit(snap("abc"), true, t0);

        assert!(history.can_undo());
        assert_eq!(history.current().content, "abc");
        assert_eq!(history.undo().map(|s| s.content.clone()).as_deref(), Some(""));
        assert!(history.can_redo());
    }

    #[test]
    fn test_debounce_waits_for_deadline() {
        let t0 = Instant::now();
        let mut history = History::new("", 20, DEFAULT_DEBOUNCE);
        history.record_edit(snap("a"), false, t0);

        assert!(!history.poll(t0 + Duration::from_millis(299)));
        assert!(!history.can_undo());
        assert!(history.state().pending);
        assert!(history.poll(t0 + Duration::from_millis(300)));
        assert_eq!(history.undo_depth(), 1);
        assert!(!history.state().pending);
    }

    #[test]
    fn test_debounce_rearms_on_each_edit() {
        let t0 = Instant::now();
        let mut history = History::new("", 20, DEFAULT_DEBOUNCE);
        history.record_edit(snap("a"), false, t0);
        history.record_edit(snap("ab"), false, t0 + Duration::from_millis(200));

        assert!(!history.poll(t0 + Duration::from_millis(400)));
        assert_eq!(history.deadline(), Some(t0 + Duration::from_millis(500)));
        assert!(history.poll(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn test_unchanged_content_records_nothing() {
        let t0 = Instant::now();
        let mut history = History::new("x", 20, DEFAULT_DEBOUNCE);
        history.record_edit(Snapshot::at_origin("x"), true, t0);
        assert_eq!(history.undo_depth(), 0);

        history.record_edit(snap("xy"), true, t0);
        history.record_edit(snap("xy"), true, t0);
        history.record_edit(Snapshot::new("xy", caret(1)), true, t0);
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.current().caret, caret(1));
    }

    #[test]
    fn test_unchanged_forced_edit_keeps_redo() {
        let t0 = Instant::now();
        let mut history = History::new("", 20, DEFAULT_DEBOUNCE);
        history.record_edit(snap("a"), true, t0);
        history.undo();
        history.record_edit(snap(""), true, t0);
        assert!(history.can_redo());
    }

    #[test]
    fn test_reverted_burst_commits_nothing() {
        let t0 = Instant::now();
        let mut history = History::new("ab", 20, DEFAULT_DEBOUNCE);
        history.record_edit(snap("abc"), false, t0);
        history.record_edit(snap("ab"), false, t0);
        assert!(!history.poll(t0 + DEFAULT_DEBOUNCE));
        assert!(!history.state().pending);
        assert_eq!(history.undo_depth(), 0);
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let t0 = Instant::now();
        let mut history = History::new("0", 3, DEFAULT_DEBOUNCE);
        for i in 1..=5 {
            history.record_edit(snap(&i.to_string()), true, t0);
        }
        assert_eq!(history.undo_depth(), 3);

        let mut seen = Vec::new();
        while let Some(s) = history.undo() {
            seen.push(s.content.clone());
        }
        assert_eq!(seen, vec!["4", "3", "2"]);
    }

    #[test]
    fn test_set_limit_shrinks_stack() {
        let t0 = Instant::now();
        let mut history = History::new("0", 10, DEFAULT_DEBOUNCE);
        for i in 1..=6 {
            history.record_edit(snap(&i.to_string()), true, t0);
        }
        history.set_limit(2);
        assert_eq!(history.undo_depth(), 2);
        assert_eq!(history.limit(), 2);
    }

    #[test]
    fn test_reset_clears_everything() {
        let t0 = Instant::now();
        let mut history = History::new("", 20, DEFAULT_DEBOUNCE);
        history.record_edit(snap("a"), true, t0);
        history.record_edit(snap("ab"), false, t0);
        history.reset("fresh");

        assert_eq!(history.state().undo_depth, 0);
        assert!(!history.state().pending);
        assert_eq!(history.current(), &Snapshot::at_origin("fresh"));
    }

    #[test]
    fn test_empty_undo_redo_are_noops() {
        let mut history = History::new("a", 20, DEFAULT_DEBOUNCE);
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.current().content, "a");
    }
}
