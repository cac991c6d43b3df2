//! Core types and queries for the page-load state machine.

use folio_common::{DocumentReference, HistoryEntry};

use crate::affordances::Affordances;
use crate::error::ErrorKind;
use crate::model::PageViewModel;
use crate::timer::ActiveTimer;

/// Lifecycle of the document on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// A request to show a document in the active tab.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub reference: DocumentReference,
    pub entry: HistoryEntry,
    pub push_back_stack: bool,
    /// Scroll offset to restore once the document is shown.
    pub staged_scroll_y: Option<i32>,
    pub is_refresh: bool,
}

impl LoadRequest {
    /// A fresh navigation that pushes onto the backstack.
    pub fn new(reference: DocumentReference, entry: HistoryEntry) -> Self {
        Self {
            reference,
            entry,
            push_back_stack: true,
            staged_scroll_y: None,
            is_refresh: false,
        }
    }

    pub fn without_push(mut self) -> Self {
        self.push_back_stack = false;
        self
    }

    pub fn with_scroll(mut self, scroll_y: Option<i32>) -> Self {
        self.staged_scroll_y = scroll_y;
        self
    }
}

/// Handle for an issued fetch. The completion must carry the generation back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub reference: DocumentReference,
}

/// Result of going back within the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopOutcome {
    /// The previous document is being reloaded.
    Reloaded(LoadTicket),
    /// Nothing left; the tab should go.
    Exhausted,
}

/// Sequences loads for the active tab and keeps the page model current.
#[derive(Debug)]
pub struct PageLoadStateMachine {
    pub(super) state: LoadState,
    /// Bumped on every issued load. Completions with another value are stale.
    pub(super) generation: u64,
    pub(super) model: PageViewModel,
    pub(super) affordances: Affordances,
    pub(super) timer: ActiveTimer,
    pub(super) current_error: Option<ErrorKind>,
    pub(super) staged_scroll_y: Option<i32>,
    pub(super) is_refresh: bool,
    /// Set once any load has succeeded.
    pub(super) has_loaded: bool,
    /// The select-text tip is still owed to the user.
    pub(super) tip_eligible: bool,
}

impl PageLoadStateMachine {
    pub fn new(select_text_tip: bool) -> Self {
        Self {
            state: LoadState::Idle,
            generation: 0,
            model: PageViewModel::default(),
            affordances: Affordances::new(),
            timer: ActiveTimer::new(),
            current_error: None,
            staged_scroll_y: None,
            is_refresh: false,
            has_loaded: false,
            tip_eligible: select_text_tip,
        }
    }

    // -- Queries --

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn current_error(&self) -> Option<ErrorKind> {
        self.current_error
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn is_error(&self) -> bool {
        self.state == LoadState::Error
    }

    pub fn affordances(&self) -> &Affordances {
        &self.affordances
    }

    pub fn model(&self) -> &PageViewModel {
        &self.model
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn timer(&self) -> &ActiveTimer {
        &self.timer
    }

    // -- Reading timer --

    pub fn pause(&mut self) {
        self.timer.pause();
    }

    pub fn resume(&mut self) {
        self.timer.resume();
    }

    /// Close the table of contents if open. Returns whether it was.
    pub fn close_toc(&mut self) -> bool {
        std::mem::replace(&mut self.affordances.toc_open, false)
    }

    pub fn open_toc(&mut self) {
        if self.affordances.toc_enabled {
            self.affordances.toc_open = true;
        }
    }
}

impl Default for PageLoadStateMachine {
    fn default() -> Self {
        Self::new(true)
    }
}
