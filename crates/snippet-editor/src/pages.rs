//! Page Container
//!
//! An ordered list of named pages, each owning its own [`History`], plus the active-page index.
//!
//! Hosts subscribe to [`PageChange`] notifications to learn which page is shown. Notifications are
//! suppressed while the container is marked as *initializing*, so a programmatic bulk load does
//! not report (and persist) transient page indices.

use crate::history::{History, Snapshot};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page-level errors. The container is left unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// A page index was out of range.
    #[error("page index {index} out of range (page count {len})")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of pages.
        len: usize,
    },
    /// The last remaining page cannot be removed.
    #[error("cannot remove the last page")]
    LastPage,
}

/// Payload delivered to page-change subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageChange {
    /// Index of the now-active page.
    pub index: usize,
    /// Its title.
    pub title: String,
    /// Its content.
    pub content: String,
}

/// Page-change callback function type
pub type PageChangeCallback = Box<dyn FnMut(&PageChange) + Send>;

/// A titled buffer with its own undo/redo history.
#[derive(Debug, Clone)]
pub struct Page {
    /// Page title.
    pub title: String,
    history: History,
}

impl Page {
    fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        limit: usize,
        debounce: Duration,
    ) -> Self {
        Self {
            title: title.into(),
            history: History::new(content, limit, debounce),
        }
    }

    /// Current content.
    pub fn content(&self) -> &str {
        &self.history.current().content
    }

    /// Current `(content, caret)`.
    pub fn snapshot(&self) -> &Snapshot {
        self.history.current()
    }

    /// The page's history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Mutable access to the page's history.
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }
}

/// Ordered pages and the active index.
///
/// Always holds at least one page.
pub struct PageContainer {
    pages: Vec<Page>,
    active: usize,
    initializing: bool,
    callbacks: Vec<PageChangeCallback>,
    history_limit: usize,
    debounce: Duration,
}

impl PageContainer {
    /// A container with a single empty page.
    pub fn new(history_limit: usize, debounce: Duration) -> Self {
        Self {
            pages: vec![Page::new(default_title(0), "", history_limit, debounce)],
            active: 0,
            initializing: false,
            callbacks: Vec::new(),
            history_limit,
            debounce,
        }
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always `false`; present for API symmetry with [`PageContainer::len`].
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Index of the active page.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active page.
    pub fn active(&self) -> &Page {
        &self.pages[self.active]
    }

    /// The active page, mutably.
    pub fn active_mut(&mut self) -> &mut Page {
        &mut self.pages[self.active]
    }

    /// Page at `index`.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// All pages in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Whether notifications are currently suppressed.
    pub fn is_initializing(&self) -> bool {
        self.initializing
    }

    /// Suppress (or resume) page-change notifications.
    pub fn set_initializing(&mut self, initializing: bool) {
        self.initializing = initializing;
    }

    /// Subscribe to page-change notifications
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&PageChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Make `index` the active page.
    ///
    /// The outgoing page's pending debounced snapshot is committed first, so nothing fires for
    /// it after the switch. An out-of-range index changes nothing, pending edits included.
    pub fn switch_to(&mut self, index: usize) -> Result<&Snapshot, PageError> {
        if index >= self.pages.len() {
            return Err(PageError::OutOfRange {
                index,
                len: self.pages.len(),
            });
        }
        self.pages[self.active].history.settle();

        debug!(from = self.active, to = index, "switch page");
        self.active = index;
        self.notify();
        Ok(self.pages[index].history.current())
    }

    /// Replace every page, discarding all history, and activate the first.
    ///
    /// An empty list yields one empty page. A notification is sent only if the previously active
    /// page was not the first.
    pub fn replace_all_pages<I, T, C>(&mut self, pages: I)
    where
        I: IntoIterator<Item = (T, C)>,
        T: Into<String>,
        C: Into<String>,
    {
        let previous = self.active;
        let (limit, debounce) = (self.history_limit, self.debounce);
        self.pages = pages
            .into_iter()
            .map(|(title, content)| Page::new(title, content, limit, debounce))
            .collect();
        if self.pages.is_empty() {
            self.pages.push(Page::new(default_title(0), "", limit, debounce));
        }
        self.active = 0;
        debug!(count = self.pages.len(), "replace all pages");
        if previous != 0 {
            self.notify();
        }
    }

    /// Append a page and return its index.
    pub fn add_page(&mut self, title: impl Into<String>, content: impl Into<String>) -> usize {
        self.pages.push(Page::new(title, content, self.history_limit, self.debounce));
        self.pages.len() - 1
    }

    /// Rename the page at `index`.
    pub fn rename_page(&mut self, index: usize, title: impl Into<String>) -> Result<(), PageError> {
        let len = self.pages.len();
        let page = self
            .pages
            .get_mut(index)
            .ok_or(PageError::OutOfRange { index, len })?;
        page.title = title.into();
        Ok(())
    }

    /// Remove the page at `index` and return it.
    ///
    /// The active index keeps pointing at the same page; if the active page itself is removed, its
    /// predecessor (or the new first page) becomes active and subscribers are notified.
    pub fn remove_page(&mut self, index: usize) -> Result<Page, PageError> {
        let len = self.pages.len();
        if index >= len {
            return Err(PageError::OutOfRange { index, len });
        }
        if len == 1 {
            return Err(PageError::LastPage);
        }

        let removed = self.pages.remove(index);
        if index < self.active {
            self.active -= 1;
        } else if index == self.active {
            self.active = index.saturating_sub(1);
            self.notify();
        }
        Ok(removed)
    }

    /// Change the history settings for every page, present and future.
    pub fn set_history_settings(&mut self, limit: usize, debounce: Duration) {
        self.history_limit = limit;
        self.debounce = debounce;
        for page in &mut self.pages {
            page.history.set_limit(limit);
            page.history.set_debounce(debounce);
        }
    }

    fn notify(&mut self) {
        if self.initializing {
            return;
        }
        let page = &self.pages[self.active];
        let change = PageChange {
            index: self.active,
            title: page.title.clone(),
            content: page.content().to_string(),
        };
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}

fn default_title(index: usize) -> String {
    format!("Page {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::DEFAULT_DEBOUNCE;
    use std::sync::{Arc, Mutex};

    fn container(pages: &[(&str, &str)]) -> PageContainer {
        let mut c = PageContainer::new(20, DEFAULT_DEBOUNCE);
        c.replace_all_pages(pages.iter().copied());
        c
    }

    fn recorder(c: &mut PageContainer) -> Arc<Mutex<Vec<PageChange>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        c.subscribe(move |change| sink.lock().unwrap().push(change.clone()));
        seen
    }

    #[test]
    fn test_new_has_one_empty_page() {
        let c = PageContainer::new(20, DEFAULT_DEBOUNCE);
        assert_eq!(c.len(), 1);
        assert_eq!(c.active().title, "Page 1");
        assert_eq!(c.active().content(), "");
    }

    #[test]
    fn test_switch_notifies() {
        let mut c = container(&[("a", "one"), ("b", "two")]);
        let seen = recorder(&mut c);

        let snapshot = c.switch_to(1).unwrap();
        assert_eq!(snapshot.content, "two");
        assert_eq!(snapshot.caret.char_index, 0);
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &[PageChange {
                index: 1,
                title: "b".into(),
                content: "two".into()
            }]
        );
    }

    #[test]
    fn test_switch_out_of_range_is_noop() {
        let mut c = container(&[("a", "one")]);
        let seen = recorder(&mut c);
        assert_eq!(
            c.switch_to(3).unwrap_err(),
            PageError::OutOfRange { index: 3, len: 1 }
        );
        assert_eq!(c.active_index(), 0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_switch_out_of_range_keeps_pending_edit() {
        let t0 = std::time::Instant::now();
        let mut c = container(&[("a", ""), ("b", "")]);
        c.active_mut()
            .history_mut()
            .record_edit(Snapshot::at_origin("x"), false, t0);
        let before = c.active().history().state();

        assert!(c.switch_to(9).is_err());
        assert_eq!(c.active().history().state(), before);
        assert!(before.pending);
    }

    #[test]
    fn test_initializing_suppresses_notifications() {
        let mut c = container(&[("a", ""), ("b", "")]);
        let seen = recorder(&mut c);
        c.set_initializing(true);
        c.switch_to(1).unwrap();
        assert!(seen.lock().unwrap().is_empty());
        c.set_initializing(false);
        c.switch_to(0).unwrap();
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_replace_all_notifies_only_from_nonzero() {
        let mut c = container(&[("a", ""), ("b", "")]);
        let seen = recorder(&mut c);

        c.replace_all_pages([("x", "1")]);
        assert!(seen.lock().unwrap().is_empty());

        c.add_page("y", "2");
        c.switch_to(1).unwrap();
        c.replace_all_pages([("z", "3")]);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].title, "z");
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_replace_all_with_nothing_keeps_one_page() {
        let mut c = container(&[("a", "")]);
        c.replace_all_pages(Vec::<(String, String)>::new());
        assert_eq!(c.len(), 1);
        assert_eq!(c.active().title, "Page 1");
    }

    #[test]
    fn test_remove_and_rename() {
        let mut c = container(&[("a", ""), ("b", ""), ("c", "")]);
        c.switch_to(2).unwrap();
        c.remove_page(0).unwrap();
        assert_eq!(c.active_index(), 1);
        assert_eq!(c.active().title, "c");

        c.rename_page(1, "renamed").unwrap();
        assert_eq!(c.active().title, "renamed");
        assert!(c.rename_page(5, "nope").is_err());

        c.remove_page(1).unwrap();
        assert_eq!(c.active().title, "b");
        assert_eq!(c.remove_page(0).unwrap_err(), PageError::LastPage);
    }
}
