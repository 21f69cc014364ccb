//! Linear undo/redo history of document snapshots.
//!
//! Every entry holds the document before and after one logical change.
//! Gestures open a batch at their start and close it at their end, so all
//! intermediate writes collapse into a single entry.

use crate::document::DocumentSnapshot;

/// Default maximum number of undo entries kept.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// One undoable unit.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    label: String,
    before: DocumentSnapshot,
    after: DocumentSnapshot,
}

impl HistoryEntry {
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Clone)]
struct PendingBatch {
    label: String,
    before: DocumentSnapshot,
}

/// Undo and redo stacks with gesture batching.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    max_depth: usize,
    batch: Option<PendingBatch>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
            batch: None,
        }
    }

    /// Record a completed change. Returns false when nothing changed.
    pub fn record(
        &mut self,
        label: impl Into<String>,
        before: DocumentSnapshot,
        after: DocumentSnapshot,
    ) -> bool {
        if before == after {
            return false;
        }
        let label = label.into();
        log::trace!("History: recorded \"{label}\"");
        self.undo_stack.push(HistoryEntry {
            label,
            before,
            after,
        });
        self.redo_stack.clear();
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        true
    }

    /// Start grouping changes. Returns false if a batch is already open.
    pub fn begin_batch(&mut self, label: impl Into<String>, before: DocumentSnapshot) -> bool {
        if self.batch.is_some() {
            return false;
        }
        self.batch = Some(PendingBatch {
            label: label.into(),
            before,
        });
        true
    }

    /// Close the open batch, recording one entry if the document changed.
    pub fn end_batch(&mut self, after: DocumentSnapshot) -> bool {
        match self.batch.take() {
            Some(batch) => self.record(batch.label, batch.before, after),
            None => false,
        }
    }

    /// Abandon the open batch, returning the state it started from.
    pub fn cancel_batch(&mut self) -> Option<DocumentSnapshot> {
        self.batch.take().map(|batch| batch.before)
    }

    pub fn is_batching(&self) -> bool {
        self.batch.is_some()
    }

    /// Pop the latest entry and return the snapshot to restore.
    pub fn undo(&mut self) -> Option<DocumentSnapshot> {
        if self.is_batching() {
            log::debug!("Undo ignored while a gesture is in progress");
            return None;
        }
        let entry = self.undo_stack.pop()?;
        let snapshot = entry.before.clone();
        log::trace!("History: undo \"{}\"", entry.label);
        self.redo_stack.push(entry);
        Some(snapshot)
    }

    /// Pop the latest undone entry and return the snapshot to restore.
    pub fn redo(&mut self) -> Option<DocumentSnapshot> {
        if self.is_batching() {
            log::debug!("Redo ignored while a gesture is in progress");
            return None;
        }
        let entry = self.redo_stack.pop()?;
        let snapshot = entry.after.clone();
        log::trace!("History: redo \"{}\"", entry.label);
        self.undo_stack.push(entry);
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.last().map(HistoryEntry::label)
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.last().map(HistoryEntry::label)
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.batch = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::page::Page;

    fn snapshots() -> (DocumentSnapshot, DocumentSnapshot) {
        let mut doc = Document::default();
        let before = doc.snapshot();
        doc.add_page(Page::DEFAULT_SIZE);
        (before, doc.snapshot())
    }

    #[test]
    fn test_undo_empty_stack() {
        let mut history = History::default();
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_record_undo_redo() {
        let (before, after) = snapshots();
        let mut history = History::default();
        assert!(history.record("Add page", before.clone(), after.clone()));
        assert_eq!(history.undo_label(), Some("Add page"));

        assert_eq!(history.undo(), Some(before));
        assert!(history.can_redo());
        assert_eq!(history.redo_label(), Some("Add page"));
        assert_eq!(history.redo(), Some(after));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_no_change_records_nothing() {
        let (before, _) = snapshots();
        let mut history = History::default();
        assert!(!history.record("Nothing", before.clone(), before));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_new_record_clears_redo() {
        let (before, after) = snapshots();
        let mut history = History::default();
        history.record("a", before.clone(), after.clone());
        history.undo();
        assert!(history.can_redo());
        history.record("b", before, after);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_max_depth_drops_oldest() {
        let (before, after) = snapshots();
        let mut history = History::new(2);
        history.record("one", before.clone(), after.clone());
        history.record("two", before.clone(), after.clone());
        history.record("three", before, after);
        assert_eq!(history.undo_len(), 2);
        history.undo();
        assert_eq!(history.undo_label(), Some("two"));
    }

    #[test]
    fn test_batch_records_once() {
        let (before, after) = snapshots();
        let mut history = History::default();
        assert!(history.begin_batch("Move", before.clone()));
        assert!(!history.begin_batch("Nested", before));
        assert!(history.is_batching());
        assert!(history.undo().is_none());
        assert!(history.end_batch(after));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.undo_label(), Some("Move"));
    }

    #[test]
    fn test_batch_without_change_records_nothing() {
        let (before, _) = snapshots();
        let mut history = History::default();
        history.begin_batch("Move", before.clone());
        assert!(!history.end_batch(before));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_cancel_batch_returns_start_state() {
        let (before, _) = snapshots();
        let mut history = History::default();
        history.begin_batch("Resize", before.clone());
        assert_eq!(history.cancel_batch(), Some(before));
        assert!(!history.is_batching());
        assert!(!history.end_batch(snapshots().1));
    }
}
