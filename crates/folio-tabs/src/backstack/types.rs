//! Core types for a tab's history.

use folio_common::{DocumentReference, HistoryEntry};
use serde::{Deserialize, Serialize};

/// One visited document in a tab's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackStackItem {
    pub reference: DocumentReference,
    pub entry: HistoryEntry,
    /// Scroll offset saved when the user left the document.
    #[serde(default)]
    pub scroll_y: Option<i32>,
}

impl BackStackItem {
    pub fn new(reference: DocumentReference, entry: HistoryEntry) -> Self {
        Self {
            reference,
            entry,
            scroll_y: None,
        }
    }

    /// Build an item whose reference is the entry's own.
    pub fn from_entry(entry: HistoryEntry) -> Self {
        Self::new(entry.reference.clone(), entry)
    }
}

/// Result of pushing onto a backstack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed,
    /// The top already shows this document; nothing was appended.
    SameAsTop,
}

/// Ordered history of one tab. The last item is the one on screen; no two
/// adjacent items share a reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackStack {
    pub(super) items: Vec<BackStackItem>,
}

impl BackStack {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in visit order, oldest first.
    pub fn items(&self) -> &[BackStackItem] {
        &self.items
    }

    pub fn peek_top(&self) -> Option<&BackStackItem> {
        self.items.last()
    }
}
