//! Mutating operations on BackStack: push, pop, update_top.

use folio_common::HistoryEntry;

use super::{BackStack, BackStackItem, PushOutcome};

impl BackStack {
    /// Append an item unless the top already shows the same document.
    /// References compare without their fragment, so a same-page anchor
    /// jump is reported as `SameAsTop`.
    pub fn push(&mut self, item: BackStackItem) -> PushOutcome {
        if let Some(top) = self.items.last() {
            if top.reference == item.reference {
                return PushOutcome::SameAsTop;
            }
        }
        self.items.push(item);
        PushOutcome::Pushed
    }

    /// Remove the top item. Returns `true` while items remain; `false` means
    /// the owning tab has run out of history.
    pub fn pop(&mut self) -> bool {
        self.items.pop();
        !self.items.is_empty()
    }

    /// Replace the top item's history entry. The reference is left alone.
    pub fn update_top(&mut self, entry: HistoryEntry) {
        if let Some(top) = self.items.last_mut() {
            top.entry = entry;
        }
    }

    /// Remember where the user was scrolled on the top document.
    pub fn update_top_scroll(&mut self, scroll_y: i32) {
        if let Some(top) = self.items.last_mut() {
            top.scroll_y = Some(scroll_y);
        }
    }

    /// Empty the stack. Used when a tab is reused for a fresh history.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
