//! Load, completion, refresh and back operations on PageLoadStateMachine.

use folio_common::{HistoryEntry, HistorySource};
use folio_tabs::{BackStack, BackStackItem};
use tracing::{debug, warn};

use crate::error::{ErrorKind, FetchError};
use crate::host::{HostEvent, HostPort};
use crate::model::{Document, PageViewModel, ReadingListPage};

use super::{LoadRequest, LoadState, LoadTicket, PageLoadStateMachine, PopOutcome};

impl PageLoadStateMachine {
    /// Start showing `request.reference` in the tab owning `back_stack`.
    ///
    /// Returns a ticket when a fetch must be issued. Navigating to the
    /// document already on top of the backstack only scrolls to its anchor,
    /// unless nothing has been loaded yet.
    pub fn load(
        &mut self,
        request: LoadRequest,
        back_stack: &mut BackStack,
        host: &mut dyn HostPort,
    ) -> Option<LoadTicket> {
        let same_as_top = back_stack
            .peek_top()
            .is_some_and(|top| top.reference == request.reference);
        if request.push_back_stack && same_as_top {
            if self.model.document.is_none() {
                return self.load_from_back_stack(back_stack, host);
            }
            if let Some(anchor) = request.reference.fragment() {
                host.emit(HostEvent::ScrollToAnchor(anchor.to_string()));
            }
            return None;
        }

        self.persist_reading_time(host);
        self.timer.reset();
        self.affordances.toc_enabled = false;
        self.affordances.toc_open = false;

        self.current_error = None;
        host.emit(HostEvent::HideError);
        self.affordances.enable_all();

        self.model = PageViewModel::for_load(request.reference.clone(), request.entry.clone());
        host.emit(HostEvent::Progress {
            visible: true,
            indeterminate: true,
        });

        if request.push_back_stack {
            back_stack.push(BackStackItem::new(request.reference.clone(), request.entry));
        }

        self.generation += 1;
        self.state = LoadState::Loading;
        self.staged_scroll_y = request.staged_scroll_y;
        self.is_refresh = request.is_refresh;
        debug!(
            generation = self.generation,
            reference = %request.reference,
            refresh = request.is_refresh,
            "load issued"
        );

        Some(LoadTicket {
            generation: self.generation,
            reference: request.reference,
        })
    }

    /// Reload the backstack's top item without pushing.
    pub fn load_from_back_stack(
        &mut self,
        back_stack: &mut BackStack,
        host: &mut dyn HostPort,
    ) -> Option<LoadTicket> {
        let Some(top) = back_stack.peek_top().cloned() else {
            debug!("backstack empty, nothing to load");
            return None;
        };
        let request = LoadRequest::new(top.reference, top.entry)
            .without_push()
            .with_scroll(top.scroll_y);
        self.load(request, back_stack, host)
    }

    /// Apply a successful fetch. Returns `false` when the completion is stale.
    pub fn on_fetch_success(
        &mut self,
        generation: u64,
        document: Document,
        host: &mut dyn HostPort,
    ) -> bool {
        if !self.accepts(generation) {
            debug!(generation, current = self.generation, "discarding stale load completion");
            return false;
        }

        self.state = LoadState::Loaded;
        self.affordances.apply_document(document.is_article);
        self.affordances.toc_enabled = true;

        let reference = document.reference.clone();
        let sections = document.sections.clone();
        let is_article = document.is_article;
        self.model.reference = Some(reference.clone());
        self.model.document = Some(document);

        host.emit(HostEvent::Progress {
            visible: false,
            indeterminate: true,
        });
        if std::mem::take(&mut self.is_refresh) {
            host.emit(HostEvent::RefreshFinished);
        }
        host.emit(HostEvent::InvalidateMenu);
        host.emit(HostEvent::SetupToc {
            sections,
            first_page: !self.has_loaded,
        });
        self.has_loaded = true;
        host.emit(HostEvent::BindEditor(reference.clone()));
        host.emit(HostEvent::BookmarkChanged {
            saved: self.model.is_in_reading_list(),
        });
        if let Some(y) = self.staged_scroll_y.take() {
            host.emit(HostEvent::ScrollTo(y));
        }
        host.emit(HostEvent::LoadComplete(reference.clone()));
        if is_article && std::mem::take(&mut self.tip_eligible) {
            host.emit(HostEvent::ShowOnboardingTip);
        }

        debug!(generation, reference = %reference, "load complete");
        true
    }

    /// Apply a failed fetch. Returns `false` when the completion is stale.
    pub fn on_fetch_failure(
        &mut self,
        generation: u64,
        error: &FetchError,
        host: &mut dyn HostPort,
    ) -> bool {
        if !self.accepts(generation) {
            debug!(generation, current = self.generation, "discarding stale load failure");
            return false;
        }

        let kind = ErrorKind::classify(error);
        self.state = LoadState::Error;
        self.current_error = Some(kind);
        self.staged_scroll_y = None;
        self.affordances.apply_error(kind);

        host.emit(HostEvent::Progress {
            visible: false,
            indeterminate: true,
        });
        if std::mem::take(&mut self.is_refresh) {
            host.emit(HostEvent::RefreshFinished);
        }
        host.emit(HostEvent::HidePageContent);
        if let Some(reference) = self.model.reference.clone() {
            host.emit(HostEvent::ShowError { reference, kind });
        }

        warn!(generation, ?kind, error = %error, "page load failed");
        true
    }

    /// Reload the current document with a fresh history entry. Only stops
    /// the spinner while a load is running or refresh is disabled.
    pub fn refresh(
        &mut self,
        back_stack: &mut BackStack,
        host: &mut dyn HostPort,
    ) -> Option<LoadTicket> {
        if self.is_loading() || !self.affordances.refresh_enabled {
            host.emit(HostEvent::RefreshFinished);
            return None;
        }
        self.reload_current(back_stack, host)
    }

    /// Try again after an error. No effect in any other state.
    pub fn retry(
        &mut self,
        back_stack: &mut BackStack,
        host: &mut dyn HostPort,
    ) -> Option<LoadTicket> {
        if !self.is_error() {
            return None;
        }
        self.reload_current(back_stack, host)
    }

    fn reload_current(
        &mut self,
        back_stack: &mut BackStack,
        host: &mut dyn HostPort,
    ) -> Option<LoadTicket> {
        let Some(reference) = self.model.reference.clone() else {
            return self.load_from_back_stack(back_stack, host);
        };
        let entry = HistoryEntry::new(reference.clone(), HistorySource::History);
        let mut request = LoadRequest::new(reference, entry).without_push();
        request.is_refresh = true;
        self.load(request, back_stack, host)
    }

    /// Go back one document. The caller saves scroll state beforehand.
    pub fn pop_back_stack(
        &mut self,
        back_stack: &mut BackStack,
        host: &mut dyn HostPort,
    ) -> PopOutcome {
        if !back_stack.pop() {
            return PopOutcome::Exhausted;
        }
        match self.load_from_back_stack(back_stack, host) {
            Some(ticket) => PopOutcome::Reloaded(ticket),
            None => PopOutcome::Exhausted,
        }
    }

    /// Store reading time and scroll offset on the backstack's top item,
    /// provided it is the document this machine is showing.
    pub fn update_current_back_stack_item(&mut self, back_stack: &mut BackStack, scroll_y: i32) {
        let Some(top) = back_stack.peek_top() else {
            return;
        };
        let showing = self.model.original_reference.as_ref() == Some(&top.reference)
            || self.model.reference.as_ref() == Some(&top.reference);
        if !showing {
            return;
        }
        if let Some(entry) = self.model.entry.as_mut() {
            entry.record_time_spent(self.timer.elapsed_secs());
            back_stack.update_top(entry.clone());
        }
        back_stack.update_top_scroll(scroll_y);
    }

    /// Associate the current document with a saved-pages list, or clear it.
    pub fn set_reading_list_page(&mut self, page: Option<ReadingListPage>, host: &mut dyn HostPort) {
        self.model.reading_list_page = page;
        host.emit(HostEvent::BookmarkChanged {
            saved: self.model.is_in_reading_list(),
        });
    }

    /// Bring the current entry's reading time up to date and hand it to
    /// history storage. The timer keeps its total.
    pub fn persist_reading_time(&mut self, host: &mut dyn HostPort) {
        let elapsed = self.timer.elapsed_secs();
        if let Some(entry) = self.model.entry.as_mut() {
            entry.record_time_spent(elapsed);
            host.emit(HostEvent::PersistHistory(entry.clone()));
        }
    }

    fn accepts(&self, generation: u64) -> bool {
        generation == self.generation && self.state == LoadState::Loading
    }
}
