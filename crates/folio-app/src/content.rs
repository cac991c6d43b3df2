//! Stored documents on the local filesystem.
//!
//! Documents live at `{root}/{site}/{Url_path}.html`. Pages saved for
//! offline reading live under `{root}/offline/{site}/` with the same naming.
//! Headings are pulled from the stored HTML to build the table of contents.

use std::path::PathBuf;
use std::sync::LazyLock;

use folio_common::DocumentReference;
use folio_page::{Document, FetchError, OfflineStore, Section};
use regex::Regex;

const OFFLINE_DIR: &str = "offline";

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());
static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").unwrap());
static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<h([2-6])[^>]*\bid="([^"]+)"[^>]*>(.*?)</h[2-6]>"#).unwrap()
});
static REDIRECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!--\s*redirect:\s*(.+?)\s*-->").unwrap());
static LANGUAGES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+name="languages"\s+content="(\d+)"\s*/?>"#).unwrap()
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Where a document is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shelf {
    /// The regular content directory.
    Online,
    /// Pages saved for offline reading.
    Offline,
}

/// Resolves references to stored HTML files under a root directory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    /// Site assumed for bare display names.
    default_site: String,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>, default_site: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            default_site: default_site.into(),
        }
    }

    /// File a reference maps to on the given shelf. Not checked for existence.
    pub fn path_for(&self, reference: &DocumentReference, shelf: Shelf) -> PathBuf {
        let base = match shelf {
            Shelf::Online => self.root.clone(),
            Shelf::Offline => self.root.join(OFFLINE_DIR),
        };
        base.join(reference.site())
            .join(format!("{}.html", reference.url_path()))
    }

    /// Resolve a reference to a file that exists inside the root.
    ///
    /// Both paths are canonicalized so `..` segments and symlinks cannot
    /// escape the content directory.
    pub fn resolve(&self, reference: &DocumentReference, shelf: Shelf) -> Option<PathBuf> {
        let file_path = self.path_for(reference, shelf);
        let canonical_root = std::fs::canonicalize(&self.root).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_root) {
            tracing::warn!(path = %file_path.display(), "Refusing document outside content root");
            return None;
        }
        Some(canonical_file)
    }

    pub fn contains(&self, reference: &DocumentReference, shelf: Shelf) -> bool {
        self.resolve(reference, shelf).is_some()
    }

    /// Read and parse a stored document, following one redirect.
    pub fn read(&self, reference: &DocumentReference, shelf: Shelf) -> Result<Document, FetchError> {
        let html = self.read_raw(reference, shelf)?;
        match redirect_target(&html) {
            Some(target) => {
                let target = DocumentReference::from_prefixed_text(reference.site(), &target);
                tracing::debug!(
                    from = %reference.prefixed_text(),
                    to = %target.prefixed_text(),
                    "Following redirect"
                );
                let html = self.read_raw(&target, shelf)?;
                Ok(parse_document(target, &html))
            }
            None => Ok(parse_document(reference.without_fragment(), &html)),
        }
    }

    fn read_raw(&self, reference: &DocumentReference, shelf: Shelf) -> Result<String, FetchError> {
        if !self.root.is_dir() {
            return Err(FetchError::Unreachable(format!(
                "content directory {} does not exist",
                self.root.display()
            )));
        }
        let path = self
            .resolve(reference, shelf)
            .ok_or_else(|| FetchError::not_found(reference.prefixed_text()))?;
        std::fs::read_to_string(&path)
            .map_err(|e| FetchError::Other(format!("{}: {e}", path.display())))
    }
}

impl OfflineStore for ContentStore {
    fn contains(&self, display_name: &str) -> bool {
        let reference = DocumentReference::from_prefixed_text(self.default_site.as_str(), display_name);
        ContentStore::contains(self, &reference, Shelf::Offline)
    }
}

/// Target named by a `<!-- redirect: Target -->` marker, if any.
pub fn redirect_target(html: &str) -> Option<String> {
    REDIRECT_RE
        .captures(html)
        .map(|c| c[1].trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Build a [`Document`] from stored HTML.
pub fn parse_document(reference: DocumentReference, html: &str) -> Document {
    let mut document = Document::new(reference);

    let title = TITLE_RE
        .captures(html)
        .or_else(|| H1_RE.captures(html))
        .map(|c| plain_text(&c[1]))
        .filter(|t| !t.is_empty());
    if let Some(title) = title {
        document.display_title = title;
    }

    document.sections = SECTION_RE
        .captures_iter(html)
        .filter_map(|c| {
            let level = c[1].parse::<u8>().ok()?;
            Some(Section {
                id: c[2].to_string(),
                title: plain_text(&c[3]),
                level,
            })
        })
        .collect();

    document.language_count = LANGUAGES_RE
        .captures(html)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0);

    document
}

fn plain_text(fragment: &str) -> String {
    TAG_RE
        .replace_all(fragment, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
