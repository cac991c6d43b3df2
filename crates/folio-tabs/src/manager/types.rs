//! Core types and constructors for TabManager.

use serde::{Deserialize, Serialize};

use crate::backstack::BackStack;
use crate::tab::Tab;

/// Serializable form of the whole tab collection, in recency order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabSet {
    pub tabs: Vec<Tab>,
}

/// Where a newly opened tab goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabPlacement {
    /// End of the list; becomes the active tab.
    Foreground,
    /// Just below the active tab.
    Background,
}

/// Result of `add_tab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item landed in the active tab; the caller loads it.
    Foreground,
    /// The item waits in a background tab.
    Background,
}

/// Result of `select_tab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The tab moved to the end; reload from its backstack.
    Switched,
    AlreadyActive,
}

/// Result of `close_tab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Out-of-range position tolerated in non-strict mode.
    Ignored,
    /// The last tab went away.
    SessionEnded,
    /// The active tab closed; reload from the new last tab.
    ActiveChanged,
    Closed,
}

/// Owns the ordered tab collection. The last tab is the active one.
pub struct TabManager {
    pub(super) tabs: Vec<Tab>,
    pub(super) max_tabs: usize,
    /// Reject out-of-range closes instead of ignoring them.
    pub(super) strict_bounds: bool,
    pub(super) session_ended: bool,
}

impl TabManager {
    /// Create a manager seeded with one empty tab.
    pub fn new(max_tabs: usize) -> Self {
        Self::with_tabs(TabSet::default(), max_tabs)
    }

    /// Recreate a manager from a persisted set. An empty set seeds one empty
    /// tab; an oversized one is trimmed from the front.
    pub fn with_tabs(set: TabSet, max_tabs: usize) -> Self {
        let mut mgr = Self {
            tabs: Vec::new(),
            max_tabs: max_tabs.max(1),
            strict_bounds: cfg!(debug_assertions),
            session_ended: false,
        };
        mgr.restore(set);
        mgr
    }

    pub fn with_strict_bounds(mut self, strict: bool) -> Self {
        self.strict_bounds = strict;
        self
    }

    pub fn set_strict_bounds(&mut self, strict: bool) {
        self.strict_bounds = strict;
    }

    // -- Accessors --

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn max_tabs(&self) -> usize {
        self.max_tabs
    }

    pub fn strict_bounds(&self) -> bool {
        self.strict_bounds
    }

    pub fn is_session_ended(&self) -> bool {
        self.session_ended
    }

    /// The tab on screen.
    pub fn active(&self) -> Option<&Tab> {
        self.tabs.last()
    }

    pub fn active_mut(&mut self) -> Option<&mut Tab> {
        self.tabs.last_mut()
    }

    pub fn active_back_stack(&self) -> Option<&BackStack> {
        self.active().map(|t| &t.back_stack)
    }

    pub fn active_back_stack_mut(&mut self) -> Option<&mut BackStack> {
        self.active_mut().map(|t| &mut t.back_stack)
    }

    /// True when nothing has been opened yet: no tabs, or the single seeded
    /// tab is still empty.
    pub fn no_pages_open(&self) -> bool {
        match self.tabs.as_slice() {
            [] => true,
            [only] => only.back_stack.is_empty(),
            _ => false,
        }
    }

    // -- Persistence --

    pub fn snapshot(&self) -> TabSet {
        TabSet {
            tabs: self.tabs.clone(),
        }
    }

    /// Replace every tab with the persisted set and reopen the session.
    pub fn restore(&mut self, set: TabSet) {
        self.tabs = set.tabs;
        if self.tabs.is_empty() {
            self.tabs.push(Tab::new());
        }
        self.trim_tab_count();
        self.session_ended = false;
        tracing::debug!(tabs = self.tabs.len(), "tab set restored");
    }
}
