//! # Undo/Redo History
//!
//! Snapshot-based history over whole pages.
//!
//! ## Design
//!
//! - Before each committed mutation the active page is deep-copied onto `past`
//! - Undo swaps the current page for the newest `past` entry, parking the
//!   current page on `future`; redo is the mirror image
//! - A new snapshot clears `future`
//! - A pointer gesture opens a batch: only its first snapshot is recorded, so
//!   one drag or resize is one undo step however many move events it commits
//! - Entries remember which page they came from; undo and redo refuse to apply
//!   an entry to a different page

use crate::page::{PageDocument, PageId};

/// Default maximum number of undo levels.
pub const DEFAULT_MAX_LEVELS: usize = 100;

/// Batch state for an in-flight gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Batch {
    /// No gesture in progress.
    Closed,
    /// Gesture in progress; `recorded` once its snapshot has been taken.
    Open { recorded: bool },
}

/// Two stacks of page snapshots.
#[derive(Debug, Clone)]
pub struct History {
    /// Older states, newest last.
    past: Vec<PageDocument>,
    /// Undone states, newest last.
    future: Vec<PageDocument>,
    /// Maximum number of undo levels (0 = unlimited).
    max_levels: usize,
    batch: Batch,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create an empty history with the default level limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    /// Create an empty history keeping at most `max_levels` undo entries.
    #[must_use]
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            max_levels,
            batch: Batch::Closed,
        }
    }

    /// Record `current` as the state to return to on undo, and clear redo.
    ///
    /// Inside a gesture batch only the first call records anything.
    pub fn snapshot(&mut self, current: &PageDocument) {
        match self.batch {
            Batch::Open { recorded: true } => return,
            Batch::Open { recorded: false } => self.batch = Batch::Open { recorded: true },
            Batch::Closed => {}
        }
        self.push(current);
    }

    /// Record `current` for a discrete change, even inside a gesture batch.
    ///
    /// An open batch records again on its next snapshot, so the rest of the
    /// gesture stays one step after this one.
    pub fn record(&mut self, current: &PageDocument) {
        self.push(current);
        self.rearm_batch();
    }

    fn push(&mut self, current: &PageDocument) {
        self.past.push(current.clone());
        self.future.clear();

        if self.max_levels > 0 && self.past.len() > self.max_levels {
            let excess = self.past.len() - self.max_levels;
            self.past.drain(..excess);
        }
    }

    /// Step back: returns the state to install in place of `current`.
    ///
    /// Returns `None` (and changes nothing) when there is nothing to undo for
    /// this page.
    pub fn undo(&mut self, current: &PageDocument) -> Option<PageDocument> {
        if !self.past.last().is_some_and(|entry| entry.id == current.id) {
            if !self.past.is_empty() {
                tracing::debug!(page = %current.id, "Undo refused, newest entry belongs to another page");
            }
            return None;
        }
        let previous = self.past.pop()?;
        self.future.push(current.clone());
        self.rearm_batch();
        Some(previous)
    }

    /// Step forward: returns the state to install in place of `current`.
    ///
    /// Returns `None` (and changes nothing) when there is nothing to redo for
    /// this page.
    pub fn redo(&mut self, current: &PageDocument) -> Option<PageDocument> {
        if !self.future.last().is_some_and(|entry| entry.id == current.id) {
            if !self.future.is_empty() {
                tracing::debug!(page = %current.id, "Redo refused, newest entry belongs to another page");
            }
            return None;
        }
        let next = self.future.pop()?;
        self.past.push(current.clone());
        self.rearm_batch();
        Some(next)
    }

    /// Open a gesture batch.
    pub fn begin_batch(&mut self) {
        self.batch = Batch::Open { recorded: false };
    }

    /// Close the current gesture batch, if any.
    pub fn end_batch(&mut self) {
        self.batch = Batch::Closed;
    }

    fn rearm_batch(&mut self) {
        if let Batch::Open { .. } = self.batch {
            self.batch = Batch::Open { recorded: false };
        }
    }

    /// Check whether a gesture batch is open.
    #[must_use]
    pub fn in_batch(&self) -> bool {
        matches!(self.batch, Batch::Open { .. })
    }

    /// Check whether undo would do something for `page`.
    #[must_use]
    pub fn can_undo(&self, page: PageId) -> bool {
        self.past.last().is_some_and(|entry| entry.id == page)
    }

    /// Check whether redo would do something for `page`.
    #[must_use]
    pub fn can_redo(&self, page: PageId) -> bool {
        self.future.last().is_some_and(|entry| entry.id == page)
    }

    /// Number of undo entries.
    #[must_use]
    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    /// Number of redo entries.
    #[must_use]
    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Drop every entry that belongs to `page`.
    pub fn purge_page(&mut self, page: PageId) {
        self.past.retain(|entry| entry.id != page);
        self.future.retain(|entry| entry.id != page);
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.batch = Batch::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, ElementPatch, NewElement};

    fn page_with_heading() -> PageDocument {
        let mut page = PageDocument::new("Home");
        page.elements.insert(NewElement::new(ElementKind::Heading));
        page
    }

    #[test]
    fn test_undo_empty_is_noop() {
        let mut history = History::new();
        let page = PageDocument::new("Home");
        assert!(history.undo(&page).is_none());
        assert!(history.redo(&page).is_none());
        assert_eq!(history.past_len(), 0);
        assert_eq!(history.future_len(), 0);
    }

    #[test]
    fn test_snapshot_undo_redo() {
        let mut history = History::new();
        let before = page_with_heading();

        history.snapshot(&before);
        let mut after = before.clone();
        after.elements.insert(NewElement::new(ElementKind::Button));

        let restored = history.undo(&after).expect("undo");
        assert_eq!(restored, before);
        assert_eq!(history.future_len(), 1);

        let redone = history.redo(&restored).expect("redo");
        assert_eq!(redone, after);
        assert_eq!(history.past_len(), 1);
    }

    #[test]
    fn test_snapshot_clears_future() {
        let mut history = History::new();
        let page = page_with_heading();
        history.snapshot(&page);
        let _ = history.undo(&page);
        assert_eq!(history.future_len(), 1);

        history.snapshot(&page);
        assert_eq!(history.future_len(), 0);
    }

    #[test]
    fn test_snapshot_is_deep_copy() {
        let mut history = History::new();
        let mut page = page_with_heading();
        history.snapshot(&page);

        let id = page.elements.ids()[0];
        page.elements.update(id, &ElementPatch::content("changed"));

        let restored = history.undo(&page).expect("undo");
        assert_eq!(
            restored.elements.find(id).map(|n| n.content.as_str()),
            Some("New Heading")
        );
    }

    #[test]
    fn test_batch_records_once() {
        let mut history = History::new();
        let page = page_with_heading();

        history.begin_batch();
        for _ in 0..25 {
            history.snapshot(&page);
        }
        history.end_batch();
        assert_eq!(history.past_len(), 1);

        history.snapshot(&page);
        assert_eq!(history.past_len(), 2);
    }

    #[test]
    fn test_discrete_record_inside_batch_rearms_it() {
        let mut history = History::new();
        let mut page = page_with_heading();

        history.begin_batch();
        history.snapshot(&page);
        page.name = "discrete".into();
        history.record(&page);
        assert!(history.in_batch());
        assert_eq!(history.past_len(), 2);

        for _ in 0..5 {
            history.snapshot(&page);
        }
        history.end_batch();
        assert_eq!(history.past_len(), 3);
    }

    #[test]
    fn test_undo_inside_batch_keeps_it_open() {
        let mut history = History::new();
        let page = page_with_heading();
        history.snapshot(&page);

        history.begin_batch();
        let restored = history.undo(&page).expect("undo");
        assert!(history.in_batch());
        for _ in 0..5 {
            history.snapshot(&restored);
        }
        assert_eq!(history.past_len(), 1);
    }

    #[test]
    fn test_max_levels_drops_oldest() {
        let mut history = History::with_max_levels(3);
        let mut page = PageDocument::new("Home");
        for i in 0..5 {
            page.name = format!("v{i}");
            history.snapshot(&page);
        }
        assert_eq!(history.past_len(), 3);
        let newest = history.undo(&page).expect("undo");
        assert_eq!(newest.name, "v4");
    }

    #[test]
    fn test_undo_refuses_other_page() {
        let mut history = History::new();
        let home = page_with_heading();
        let about = PageDocument::new("About");

        history.snapshot(&home);
        assert!(!history.can_undo(about.id));
        assert!(history.undo(&about).is_none());
        assert_eq!(history.past_len(), 1);
        assert!(history.can_undo(home.id));
    }

    #[test]
    fn test_purge_page() {
        let mut history = History::new();
        let home = page_with_heading();
        let about = PageDocument::new("About");
        history.snapshot(&home);
        history.snapshot(&about);
        history.purge_page(about.id);
        assert_eq!(history.past_len(), 1);
        assert!(history.can_undo(home.id));
    }
}
