//! Select, add, close, and back-navigation operations on the TabManager.

use folio_common::NavError;

use crate::backstack::BackStackItem;
use crate::tab::Tab;

use super::{AddOutcome, CloseOutcome, SelectOutcome, TabManager, TabPlacement};

impl TabManager {
    /// Bring the tab at `position` to the front by moving it to the end.
    pub fn select_tab(&mut self, position: usize) -> Result<SelectOutcome, NavError> {
        self.ensure_open()?;
        let len = self.tabs.len();
        if position >= len {
            return Err(NavError::IndexOutOfRange { position, len });
        }
        if position == len - 1 {
            return Ok(SelectOutcome::AlreadyActive);
        }
        let tab = self.tabs.remove(position);
        self.tabs.push(tab);
        tracing::debug!(position, "tab selected");
        Ok(SelectOutcome::Switched)
    }

    /// Open `item` in a new tab.
    ///
    /// While the active tab is still the empty seeded one, the item goes
    /// there instead, and a background request with no pages open is
    /// promoted to the foreground. Overflow evicts the oldest tabs.
    pub fn add_tab(
        &mut self,
        item: BackStackItem,
        placement: TabPlacement,
    ) -> Result<AddOutcome, NavError> {
        self.ensure_open()?;
        let placement = if placement == TabPlacement::Background && self.no_pages_open() {
            TabPlacement::Foreground
        } else {
            placement
        };

        if let Some(top) = self.tabs.last_mut() {
            if top.back_stack.is_empty() {
                top.back_stack.push(item);
                return Ok(AddOutcome::Foreground);
            }
        }

        let position = match placement {
            TabPlacement::Foreground => self.tabs.len(),
            TabPlacement::Background => self.tabs.len().saturating_sub(1),
        };
        self.tabs.insert(position, Tab::with_item(item));
        self.trim_tab_count();
        tracing::debug!(position, tabs = self.tabs.len(), "tab opened");

        Ok(match placement {
            TabPlacement::Foreground => AddOutcome::Foreground,
            TabPlacement::Background => AddOutcome::Background,
        })
    }

    /// Close the tab at `position`.
    ///
    /// In non-strict mode an out-of-range position is ignored rather than
    /// reported. Closing the only tab ends the session.
    pub fn close_tab(&mut self, position: usize) -> Result<CloseOutcome, NavError> {
        self.ensure_open()?;
        let len = self.tabs.len();
        if position >= len {
            if self.strict_bounds {
                return Err(NavError::IndexOutOfRange { position, len });
            }
            tracing::warn!(position, len, "ignoring close of nonexistent tab");
            return Ok(CloseOutcome::Ignored);
        }

        let was_active = position == len - 1;
        self.tabs.remove(position);

        if self.tabs.is_empty() {
            self.session_ended = true;
            tracing::info!("last tab closed, session ended");
            return Ok(CloseOutcome::SessionEnded);
        }
        tracing::debug!(position, tabs = self.tabs.len(), "tab closed");
        Ok(if was_active {
            CloseOutcome::ActiveChanged
        } else {
            CloseOutcome::Closed
        })
    }

    /// Drop every tab and end the session.
    pub fn close_all(&mut self) {
        self.tabs.clear();
        self.session_ended = true;
        tracing::info!("all tabs closed, session ended");
    }

    /// Discard the active tab once its history is exhausted. Refuses to
    /// remove the only tab.
    pub fn pop_active_tab(&mut self) -> Option<Tab> {
        if self.tabs.len() > 1 {
            self.tabs.pop()
        } else {
            None
        }
    }

    pub(super) fn trim_tab_count(&mut self) {
        while self.tabs.len() > self.max_tabs {
            self.tabs.remove(0);
        }
    }

    fn ensure_open(&self) -> Result<(), NavError> {
        if self.session_ended {
            Err(NavError::SessionEnded)
        } else {
            Ok(())
        }
    }
}
