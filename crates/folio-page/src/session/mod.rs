//! The Navigator: single owner of the tab set, the load state machine and
//! the host side of the renderer bridge.
//!
//! All mutation happens on the control thread. Fetches are not performed
//! here; issued loads queue [`LoadTicket`]s that the host drains with
//! [`Navigator::drain_load_tickets`] and completes with
//! [`Navigator::on_fetch_complete`].

use folio_bridge::BridgeSender;
use folio_common::DocumentReference;
use folio_config::FolioConfig;
use folio_tabs::{TabManager, TabSet};

use crate::host::HostEvent;
use crate::link::{LinkRouter, OfflineStore};
use crate::load_state::{LoadTicket, PageLoadStateMachine};

mod messages;
mod navigation;

pub use navigation::BackOutcome;

/// Settings the Navigator needs from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigatorOptions {
    pub max_tabs: usize,
    pub preview_enabled: bool,
    pub decor_offset: u32,
    pub dark_mode: bool,
    pub select_text_tip: bool,
    /// Site used for links that do not name one.
    pub site: String,
    pub main_page: String,
}

impl NavigatorOptions {
    pub fn from_config(config: &FolioConfig) -> Self {
        Self {
            max_tabs: config.tabs.max_tabs,
            preview_enabled: config.links.preview_enabled,
            decor_offset: config.display.decor_offset,
            dark_mode: config.display.dark_mode,
            select_text_tip: config.onboarding.select_text_tip,
            site: config.content.site.clone(),
            main_page: config.content.main_page.clone(),
        }
    }
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self::from_config(&FolioConfig::default())
    }
}

/// Session controller for the page surface.
pub struct Navigator {
    pub(super) tabs: TabManager,
    pub(super) load: PageLoadStateMachine,
    pub(super) router: LinkRouter,
    pub(super) bridge: BridgeSender,
    pub(super) offline_store: Box<dyn OfflineStore>,
    pub(super) options: NavigatorOptions,
    pub(super) online: bool,
    /// Last scroll offset reported by the renderer.
    pub(super) scroll_y: i32,
    pub(super) events: Vec<HostEvent>,
    pub(super) tickets: Vec<LoadTicket>,
}

impl Navigator {
    pub fn new(
        options: NavigatorOptions,
        tabs: TabManager,
        bridge: BridgeSender,
        offline_store: Box<dyn OfflineStore>,
    ) -> Self {
        Self {
            tabs,
            load: PageLoadStateMachine::new(options.select_text_tip),
            router: LinkRouter::new(options.preview_enabled),
            bridge,
            offline_store,
            options,
            online: true,
            scroll_y: 0,
            events: Vec::new(),
            tickets: Vec::new(),
        }
    }

    /// Build a Navigator over a restored tab set.
    pub fn restore(
        options: NavigatorOptions,
        set: Option<TabSet>,
        bridge: BridgeSender,
        offline_store: Box<dyn OfflineStore>,
    ) -> Self {
        let tabs = TabManager::with_tabs(set.unwrap_or_default(), options.max_tabs);
        Self::new(options, tabs, bridge, offline_store)
    }

    // -- Accessors --

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    /// Mutable access to the tab set, e.g. to change bounds checking.
    pub fn tabs_mut(&mut self) -> &mut TabManager {
        &mut self.tabs
    }

    pub fn page(&self) -> &PageLoadStateMachine {
        &self.load
    }

    pub fn options(&self) -> &NavigatorOptions {
        &self.options
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    pub fn set_scroll_position(&mut self, scroll_y: i32) {
        self.scroll_y = scroll_y;
    }

    pub fn is_session_ended(&self) -> bool {
        self.tabs.is_session_ended()
    }

    pub fn snapshot(&self) -> TabSet {
        self.tabs.snapshot()
    }

    pub fn main_page_reference(&self) -> DocumentReference {
        DocumentReference::from_prefixed_text(self.options.site.as_str(), &self.options.main_page)
    }

    /// Site of the document on screen, or the configured default.
    pub(super) fn current_site(&self) -> String {
        self.load
            .model()
            .reference
            .as_ref()
            .map(|r| r.site().to_string())
            .unwrap_or_else(|| self.options.site.clone())
    }

    // -- Host queues --

    /// Take every host event raised since the last call, in order.
    pub fn drain_host_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    /// Take every load that needs fetching, oldest first.
    pub fn drain_load_tickets(&mut self) -> Vec<LoadTicket> {
        std::mem::take(&mut self.tickets)
    }
}
