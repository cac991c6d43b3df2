//! Link classification: where a clicked href leads and how to open it.

use std::collections::HashSet;

use folio_common::{DocumentReference, WIKI_PATH_PREFIX};

/// Host suffixes whose `/wiki/` paths are internal documents.
const WIKI_HOST_SUFFIXES: &[&str] = &["wikipedia.org", "wikimedia.org", "wiktionary.org"];

/// What an href in the rendered document points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Same-document anchor, without the `#`.
    Anchor(String),
    Internal(DocumentReference),
    External(String),
}

impl LinkTarget {
    /// Classify `href` relative to the document's `site`.
    pub fn parse(href: &str, site: &str) -> Self {
        let href = href.trim();
        if let Some(anchor) = href.strip_prefix('#') {
            return Self::Anchor(anchor.to_string());
        }
        if href.starts_with(WIKI_PATH_PREFIX) {
            return match DocumentReference::from_wiki_path(site, href) {
                Some(reference) => Self::Internal(reference),
                None => Self::External(href.to_string()),
            };
        }

        let (absolute, rest) = if let Some(rest) = href.strip_prefix("//") {
            (format!("https:{href}"), rest)
        } else if let Some(rest) = href
            .strip_prefix("https://")
            .or_else(|| href.strip_prefix("http://"))
        {
            (href.to_string(), rest)
        } else {
            return Self::External(href.to_string());
        };

        let (host, path) = match rest.find('/') {
            Some(i) => rest.split_at(i),
            None => (rest, ""),
        };
        if is_wiki_host(host) {
            if let Some(reference) = DocumentReference::from_wiki_path(desktop_host(host), path) {
                return Self::Internal(reference);
            }
        }
        Self::External(absolute)
    }
}

fn is_wiki_host(host: &str) -> bool {
    WIKI_HOST_SUFFIXES
        .iter()
        .any(|suffix| host == *suffix || host.ends_with(&format!(".{suffix}")))
}

/// `en.m.wikipedia.org` -> `en.wikipedia.org`.
fn desktop_host(host: &str) -> String {
    host.replacen(".m.", ".", 1)
}

/// Lookup of documents saved for offline reading.
pub trait OfflineStore {
    /// Whether a document with this display name is available offline.
    fn contains(&self, display_name: &str) -> bool;
}

impl OfflineStore for HashSet<String> {
    fn contains(&self, display_name: &str) -> bool {
        HashSet::contains(self, display_name)
    }
}

/// How an internal link should be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRoute {
    /// Hand the URL to an external viewer; the backstack is untouched.
    External(String),
    /// Full load into the active tab.
    Direct,
    /// Show a lightweight preview first.
    Preview,
}

/// Decides between external viewing, direct loads and previews.
#[derive(Debug, Clone)]
pub struct LinkRouter {
    preview_enabled: bool,
}

impl LinkRouter {
    pub fn new(preview_enabled: bool) -> Self {
        Self { preview_enabled }
    }

    pub fn preview_enabled(&self) -> bool {
        self.preview_enabled
    }

    pub fn set_preview_enabled(&mut self, enabled: bool) {
        self.preview_enabled = enabled;
    }

    /// Special, media and talk pages always go external. Anything else loads
    /// directly when it is outside the main namespace, when previews are off,
    /// or when offline and not saved locally; otherwise it previews.
    pub fn route(
        &self,
        reference: &DocumentReference,
        online: bool,
        offline: &dyn OfflineStore,
    ) -> LinkRoute {
        if reference.namespace().is_non_content() || reference.is_talk() {
            return LinkRoute::External(reference.mobile_url());
        }
        if !reference.is_main()
            || !self.preview_enabled
            || (!online && !offline.contains(&reference.prefixed_text()))
        {
            return LinkRoute::Direct;
        }
        LinkRoute::Preview
    }
}

impl Default for LinkRouter {
    fn default() -> Self {
        Self::new(true)
    }
}
