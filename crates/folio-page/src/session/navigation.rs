//! Tab and history operations driven by the host.

use folio_common::{DocumentReference, HistoryEntry, HistorySource, NavError};
use folio_tabs::{AddOutcome, BackStackItem, CloseOutcome, SelectOutcome, TabPlacement, TabSet};
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::host::HostEvent;
use crate::link::LinkRoute;
use crate::load_state::{LoadRequest, LoadTicket, PopOutcome};
use crate::model::Document;

use super::Navigator;

/// What a back press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// The table of contents was open and is now closed.
    ClosedToc,
    /// The previous document in this tab is loading.
    Navigated,
    /// The tab ran out of history and was closed; the next tab is showing.
    TabClosed,
    /// Nothing left to go back to. The host may leave the page surface.
    Exhausted,
}

impl Navigator {
    // =========================================================================
    // LOADING
    // =========================================================================

    /// Show `reference` in the active tab, pushing it onto the backstack.
    pub fn load_page(&mut self, reference: DocumentReference, entry: HistoryEntry) {
        self.issue_load(LoadRequest::new(reference, entry));
    }

    /// Route an internal link: external viewer, direct load, or preview.
    pub fn handle_internal_link(&mut self, reference: DocumentReference) {
        match self
            .router
            .route(&reference, self.online, self.offline_store.as_ref())
        {
            LinkRoute::External(url) => {
                debug!(url = %url, "internal link opened externally");
                self.events.push(HostEvent::OpenExternal(url));
            }
            LinkRoute::Direct => {
                let entry = HistoryEntry::new(reference.clone(), HistorySource::InternalLink);
                self.load_page(reference, entry);
            }
            LinkRoute::Preview => {
                self.events.push(HostEvent::ShowLinkPreview(reference));
            }
        }
    }

    /// The user committed to a previewed link.
    pub fn confirm_preview(&mut self, reference: DocumentReference) {
        self.events.push(HostEvent::DismissBottomSheet);
        let entry = HistoryEntry::new(reference.clone(), HistorySource::LinkPreview);
        self.load_page(reference, entry);
    }

    /// Reload the active tab's top document, e.g. at session start or after
    /// a tab switch.
    pub fn load_from_back_stack(&mut self) {
        let Some(stack) = self.tabs.active_back_stack_mut() else {
            return;
        };
        if let Some(ticket) = self.load.load_from_back_stack(stack, &mut self.events) {
            self.tickets.push(ticket);
        }
    }

    pub fn refresh(&mut self) {
        let Some(stack) = self.tabs.active_back_stack_mut() else {
            return;
        };
        if let Some(ticket) = self.load.refresh(stack, &mut self.events) {
            self.tickets.push(ticket);
        }
    }

    pub fn retry(&mut self) {
        let Some(stack) = self.tabs.active_back_stack_mut() else {
            return;
        };
        if let Some(ticket) = self.load.retry(stack, &mut self.events) {
            self.tickets.push(ticket);
        }
    }

    /// Apply a fetch result. Returns `false` when it was stale.
    pub fn on_fetch_complete(
        &mut self,
        generation: u64,
        result: Result<Document, FetchError>,
    ) -> bool {
        match result {
            Ok(document) => self.load.on_fetch_success(generation, document, &mut self.events),
            Err(error) => self.load.on_fetch_failure(generation, &error, &mut self.events),
        }
    }

    fn issue_load(&mut self, request: LoadRequest) {
        let Some(stack) = self.tabs.active_back_stack_mut() else {
            warn!(reference = %request.reference, "no active tab, load dropped");
            return;
        };
        if let Some(ticket) = self.load.load(request, stack, &mut self.events) {
            self.tickets.push(ticket);
        }
    }

    // =========================================================================
    // TABS
    // =========================================================================

    /// Open a document in a new tab. A foreground tab is loaded at once.
    pub fn open_in_new_tab(
        &mut self,
        reference: DocumentReference,
        entry: HistoryEntry,
        placement: TabPlacement,
    ) -> Result<(), NavError> {
        self.save_current_position();
        let outcome = self
            .tabs
            .add_tab(BackStackItem::new(reference, entry), placement)?;
        self.tabs_changed();
        if outcome == AddOutcome::Foreground {
            self.load_from_back_stack();
        }
        Ok(())
    }

    /// Start a session on the configured main page.
    pub fn open_main_page(&mut self) -> Result<(), NavError> {
        let reference = self.main_page_reference();
        let entry = HistoryEntry::new(reference.clone(), HistorySource::MainPage);
        self.open_in_new_tab(reference, entry, TabPlacement::Foreground)
    }

    pub fn select_tab(&mut self, position: usize) -> Result<(), NavError> {
        let is_active = self.tabs.len().checked_sub(1) == Some(position);
        if !is_active {
            self.save_current_position();
        }
        if self.tabs.select_tab(position)? == SelectOutcome::Switched {
            self.tabs_changed();
            self.load_from_back_stack();
        }
        Ok(())
    }

    pub fn close_tab(&mut self, position: usize) -> Result<CloseOutcome, NavError> {
        let outcome = self.tabs.close_tab(position)?;
        match outcome {
            CloseOutcome::Ignored => {}
            CloseOutcome::SessionEnded => {
                self.tabs_changed();
                self.end_session();
            }
            CloseOutcome::ActiveChanged => {
                self.tabs_changed();
                self.load_from_back_stack();
            }
            CloseOutcome::Closed => self.tabs_changed(),
        }
        Ok(outcome)
    }

    /// Drop every tab. The host also clears persisted tabs.
    pub fn close_all_tabs(&mut self) {
        self.tabs.close_all();
        self.tabs_changed();
        self.end_session();
    }

    /// Back navigation: close the contents, go back in this tab, or retire
    /// the tab once its history runs out.
    pub fn back(&mut self) -> BackOutcome {
        if self.load.close_toc() {
            return BackOutcome::ClosedToc;
        }
        let Some(stack) = self.tabs.active_back_stack_mut() else {
            return BackOutcome::Exhausted;
        };
        match self.load.pop_back_stack(stack, &mut self.events) {
            PopOutcome::Reloaded(ticket) => {
                self.tickets.push(ticket);
                BackOutcome::Navigated
            }
            PopOutcome::Exhausted => {
                if self.tabs.pop_active_tab().is_some() {
                    self.tabs_changed();
                    self.load_from_back_stack();
                    BackOutcome::TabClosed
                } else {
                    BackOutcome::Exhausted
                }
            }
        }
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// The page surface is going away for now. Returns the tab set to persist.
    pub fn pause(&mut self) -> TabSet {
        self.load.pause();
        self.load.persist_reading_time(&mut self.events);
        self.save_current_position();
        self.tabs.snapshot()
    }

    pub fn resume(&mut self) {
        self.load.resume();
    }

    fn save_current_position(&mut self) {
        if let Some(stack) = self.tabs.active_back_stack_mut() {
            self.load.update_current_back_stack_item(stack, self.scroll_y);
        }
    }

    fn tabs_changed(&mut self) {
        self.events.push(HostEvent::TabsChanged {
            count: self.tabs.len(),
        });
    }

    fn end_session(&mut self) {
        info!("browsing session ended");
        self.events.push(HostEvent::SessionEnded);
    }

    /// Loads still waiting on the host, newest last.
    pub fn pending_tickets(&self) -> &[LoadTicket] {
        &self.tickets
    }
}
