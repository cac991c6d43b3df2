//! Which page controls are usable right now.

use std::collections::HashSet;

use folio_common::PageAction;

use crate::error::ErrorKind;

/// Enabled state of the action tabs, table of contents and refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affordances {
    actions: HashSet<PageAction>,
    pub toc_enabled: bool,
    pub toc_open: bool,
    pub refresh_enabled: bool,
}

impl Affordances {
    pub fn new() -> Self {
        Self {
            actions: PageAction::ALL.into_iter().collect(),
            toc_enabled: false,
            toc_open: false,
            refresh_enabled: true,
        }
    }

    pub fn is_enabled(&self, action: PageAction) -> bool {
        self.actions.contains(&action)
    }

    pub fn enable_all(&mut self) {
        self.actions = PageAction::ALL.into_iter().collect();
    }

    /// Settle the actions for a loaded document.
    pub fn apply_document(&mut self, is_article: bool) {
        self.actions = PageAction::ALL
            .into_iter()
            .filter(|a| is_article || !a.requires_article())
            .collect();
        self.refresh_enabled = true;
    }

    /// Settle the controls for a failed load.
    pub fn apply_error(&mut self, kind: ErrorKind) {
        self.actions.clear();
        if kind == ErrorKind::Offline {
            self.actions.insert(PageAction::AddToReadingList);
        }
        self.toc_open = false;
        self.refresh_enabled = kind.allows_refresh();
    }

    pub fn enabled_actions(&self) -> Vec<PageAction> {
        PageAction::ALL
            .into_iter()
            .filter(|a| self.actions.contains(a))
            .collect()
    }
}

impl Default for Affordances {
    fn default() -> Self {
        Self::new()
    }
}
