//! The fetch collaborator: turns a reference into a [`Document`].

use std::sync::Arc;

use async_trait::async_trait;
use folio_common::DocumentReference;
use folio_page::{Document, FetchError};

use crate::content::{ContentStore, Shelf};

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, reference: &DocumentReference) -> Result<Document, FetchError>;
}

/// Fetches from a [`ContentStore`].
///
/// While online the regular shelf is tried first, then saved pages. While
/// offline only saved pages are reachable.
pub struct LocalFetcher {
    store: Arc<ContentStore>,
    online: bool,
}

impl LocalFetcher {
    pub fn new(store: Arc<ContentStore>, online: bool) -> Self {
        Self {
            store,
            online,
        }
    }
}

#[async_trait]
impl Fetcher for LocalFetcher {
    async fn fetch(&self, reference: &DocumentReference) -> Result<Document, FetchError> {
        let store = Arc::clone(&self.store);
        let reference = reference.clone();
        let online = self.online;

        tokio::task::spawn_blocking(move || {
            if !online {
                return store.read(&reference, Shelf::Offline).map_err(|e| match e {
                    FetchError::Status { code: 404, .. } => {
                        FetchError::Unreachable(format!("offline: {}", reference.prefixed_text()))
                    }
                    other => other,
                });
            }
            match store.read(&reference, Shelf::Online) {
                Err(FetchError::Status { code: 404, .. })
                    if store.contains(&reference, Shelf::Offline) =>
                {
                    store.read(&reference, Shelf::Offline)
                }
                result => result,
            }
        })
        .await
        .map_err(|e| FetchError::Other(format!("fetch task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = "en.wikipedia.org";

    fn fetcher(files: &[(&str, &str)], online: bool) -> (tempfile::TempDir, LocalFetcher) {
        let dir = tempfile::tempdir().unwrap();
        for (rel, body) in files {
            let path = dir.path().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, body).unwrap();
        }
        let store = Arc::new(ContentStore::new(dir.path(), SITE));
        (dir, LocalFetcher::new(store, online))
    }

    fn reference(text: &str) -> DocumentReference {
        DocumentReference::from_prefixed_text(SITE, text)
    }

    #[tokio::test]
    async fn online_fetch_reads_content_shelf() {
        let (_dir, f) = fetcher(
            &[("en.wikipedia.org/Rust.html", "<title>Rust</title><h2 id=\"a\">A</h2>")],
            true,
        );
        let doc = f.fetch(&reference("Rust")).await.unwrap();
        assert_eq!(doc.display_title, "Rust");
        assert_eq!(doc.sections.len(), 1);
    }

    #[tokio::test]
    async fn online_fetch_falls_back_to_saved_pages() {
        let (_dir, f) = fetcher(
            &[("offline/en.wikipedia.org/Saved.html", "<title>Saved</title>")],
            true,
        );
        let doc = f.fetch(&reference("Saved")).await.unwrap();
        assert_eq!(doc.display_title, "Saved");
    }

    #[tokio::test]
    async fn online_missing_is_not_found() {
        let (_dir, f) = fetcher(&[("en.wikipedia.org/Rust.html", "<p/>")], true);
        let err = f.fetch(&reference("Missing")).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { code: 404, .. }));
    }

    #[tokio::test]
    async fn offline_only_reaches_saved_pages() {
        let (_dir, f) = fetcher(
            &[
                ("en.wikipedia.org/Rust.html", "<title>Rust</title>"),
                ("offline/en.wikipedia.org/Saved.html", "<title>Saved</title>"),
            ],
            false,
        );
        let err = f.fetch(&reference("Rust")).await.unwrap_err();
        assert!(matches!(err, FetchError::Unreachable(_)));

        let doc = f.fetch(&reference("Saved")).await.unwrap();
        assert_eq!(doc.display_title, "Saved");
    }
}
