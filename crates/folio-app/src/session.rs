//! Command-line host for the navigation core.
//!
//! Owns the [`Navigator`], the renderer bridge and a tokio runtime for
//! fetches. Everything that mutates navigation state runs on the calling
//! thread; fetch completions come back through an mpsc channel tagged with
//! the generation they were issued for.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use folio_bridge::{MessageBridge, RendererMessage};
use folio_common::{DocumentReference, FolioError, HistoryEntry, HistorySource};
use folio_page::{
    BackOutcome, Document, FetchError, HostEvent, LoadTicket, Navigator, NavigatorOptions,
    OfflineStore,
};
use folio_tabs::{persist, CloseOutcome, TabPlacement};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::fetch::Fetcher;
use crate::renderer::ConsoleRenderer;

/// A finished fetch, marshaled back to the control thread.
#[derive(Debug)]
struct Completion {
    generation: u64,
    result: Result<Document, FetchError>,
}

pub struct Session {
    navigator: Navigator,
    bridge: MessageBridge<Navigator>,
    renderer: ConsoleRenderer,
    runtime: tokio::runtime::Runtime,
    fetcher: Arc<dyn Fetcher>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
    state_path: PathBuf,
}

impl Session {
    /// Restore the saved tab set from `state_path` and connect the renderer.
    ///
    /// An unreadable state file is logged and treated as a fresh session.
    pub fn open(
        options: NavigatorOptions,
        state_path: PathBuf,
        fetcher: Arc<dyn Fetcher>,
        offline_store: Box<dyn OfflineStore>,
        online: bool,
    ) -> Result<Self, FolioError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        let saved = match persist::load(&state_path) {
            Ok(set) => set,
            Err(e) => {
                warn!(path = %state_path.display(), "Ignoring unreadable tab state: {e}");
                None
            }
        };
        if let Some(set) = &saved {
            info!(tabs = set.tabs.len(), path = %state_path.display(), "Restored tabs");
        }

        let mut bridge = MessageBridge::new();
        Navigator::register_handlers(&mut bridge);

        let mut navigator = Navigator::restore(options, saved, bridge.sender(), offline_store);
        navigator.set_online(online);

        let mut renderer = ConsoleRenderer::new();
        renderer.inject_bridge()?;
        navigator.send_initial_style()?;

        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        Ok(Self {
            navigator,
            bridge,
            renderer,
            runtime,
            fetcher,
            completion_tx,
            completion_rx,
            in_flight: 0,
            state_path,
        })
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[cfg(test)]
    pub(crate) fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    /// Show the active tab's document again.
    pub fn start(&mut self) -> Result<Vec<HostEvent>, FolioError> {
        if self.navigator.tabs().no_pages_open() {
            debug!("No pages open at start");
        } else {
            self.navigator.load_from_back_stack();
        }
        self.pump()
    }

    // =========================================================================
    // COMMANDS
    // =========================================================================

    pub fn open_title(
        &mut self,
        title: &str,
        new_tab: Option<TabPlacement>,
    ) -> Result<Vec<HostEvent>, FolioError> {
        let site = self.navigator.options().site.clone();
        let reference = DocumentReference::from_prefixed_text(site, title);
        let entry = HistoryEntry::new(reference.clone(), HistorySource::Search);
        match new_tab {
            Some(placement) => self
                .navigator
                .open_in_new_tab(reference, entry, placement)?,
            None => self.navigator.load_page(reference, entry),
        }
        self.pump()
    }

    pub fn open_main_page(&mut self) -> Result<Vec<HostEvent>, FolioError> {
        if self.navigator.tabs().no_pages_open() {
            let reference = self.navigator.main_page_reference();
            let entry = HistoryEntry::new(reference.clone(), HistorySource::MainPage);
            self.navigator.load_page(reference, entry);
        } else {
            self.navigator.open_main_page()?;
        }
        self.pump()
    }

    /// Deliver a link click through the renderer channel.
    pub fn click_link(&mut self, href: &str) -> Result<Vec<HostEvent>, FolioError> {
        let msg = RendererMessage::LinkClicked {
            href: href.to_string(),
        }
        .to_bridge();
        if !self.bridge.endpoint().post_message(&msg) {
            warn!(href, "Link click not delivered");
        }
        self.pump()
    }

    pub fn back(&mut self) -> Result<(BackOutcome, Vec<HostEvent>), FolioError> {
        let outcome = self.navigator.back();
        debug!(?outcome, "back");
        Ok((outcome, self.pump()?))
    }

    pub fn refresh(&mut self) -> Result<Vec<HostEvent>, FolioError> {
        self.navigator.refresh();
        self.pump()
    }

    pub fn select_tab(&mut self, position: usize) -> Result<Vec<HostEvent>, FolioError> {
        self.navigator.select_tab(position)?;
        self.pump()
    }

    pub fn close_tab(
        &mut self,
        position: usize,
    ) -> Result<(CloseOutcome, Vec<HostEvent>), FolioError> {
        let outcome = self.navigator.close_tab(position)?;
        Ok((outcome, self.pump()?))
    }

    pub fn close_all_tabs(&mut self) -> Result<Vec<HostEvent>, FolioError> {
        self.navigator.close_all_tabs();
        self.pump()
    }

    // =========================================================================
    // EVENT PUMP
    // =========================================================================

    /// Run until no renderer messages are queued and no fetch is outstanding,
    /// then flush host-to-renderer messages. Returns the host events raised.
    pub fn pump(&mut self) -> Result<Vec<HostEvent>, FolioError> {
        loop {
            self.bridge.dispatch_pending(&mut self.navigator)?;

            for ticket in self.navigator.drain_load_tickets() {
                self.spawn_fetch(ticket);
            }
            if self.in_flight == 0 {
                break;
            }

            let Some(completion) = self.runtime.block_on(self.completion_rx.recv()) else {
                break;
            };
            self.in_flight -= 1;
            if !self
                .navigator
                .on_fetch_complete(completion.generation, completion.result)
            {
                debug!(generation = completion.generation, "Discarded stale fetch");
            }
        }

        let flushed = self.bridge.flush(&mut self.renderer)?;
        if flushed > 0 {
            debug!(
                count = flushed,
                total = self.renderer.evaluated(),
                "Flushed renderer messages"
            );
        }
        Ok(self.navigator.drain_host_events())
    }

    fn spawn_fetch(&mut self, ticket: LoadTicket) {
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.completion_tx.clone();
        debug!(generation = ticket.generation, reference = %ticket.reference, "Fetching");
        self.runtime.spawn(async move {
            let result = fetcher.fetch(&ticket.reference).await;
            let completion = Completion {
                generation: ticket.generation,
                result,
            };
            if tx.send(completion).is_err() {
                debug!(generation = ticket.generation, "Session gone, fetch result dropped");
            }
        });
        self.in_flight += 1;
    }

    // =========================================================================
    // SHUTDOWN
    // =========================================================================

    /// Persist the tab set (or clear it once the session ended), tear down
    /// the bridge and stop the runtime.
    pub fn finish(mut self) -> Result<Vec<HostEvent>, FolioError> {
        let result = if self.navigator.is_session_ended() {
            persist::clear(&self.state_path).map(|()| {
                info!(path = %self.state_path.display(), "Session ended, tab state cleared");
            })
        } else {
            let set = self.navigator.pause();
            persist::save(&set, &self.state_path).map(|()| {
                info!(tabs = set.tabs.len(), path = %self.state_path.display(), "Saved tabs");
            })
        };
        let events = self.navigator.drain_host_events();

        self.bridge.cleanup();
        self.runtime.shutdown_timeout(Duration::from_secs(2));

        result?;
        Ok(events)
    }
}
