//! What the page surface currently shows.

use folio_common::{DocumentReference, HistoryEntry};
use serde::{Deserialize, Serialize};

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// In-document anchor.
    pub id: String,
    pub title: String,
    pub level: u8,
}

/// A document as handed back by the fetch collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// May differ from the requested reference after a redirect.
    pub reference: DocumentReference,
    pub display_title: String,
    pub is_article: bool,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub language_count: u32,
}

impl Document {
    pub fn new(reference: DocumentReference) -> Self {
        let display_title = reference.prefixed_text();
        let is_article = reference.is_main();
        Self {
            reference,
            display_title,
            is_article,
            sections: Vec::new(),
            language_count: 0,
        }
    }
}

/// The current document's membership in a saved-pages list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingListPage {
    pub list_name: String,
    /// Saved for offline reading.
    pub offline: bool,
}

/// State of the page surface. Replaced wholesale on every load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageViewModel {
    pub reference: Option<DocumentReference>,
    /// The reference as requested, before any redirect.
    pub original_reference: Option<DocumentReference>,
    pub entry: Option<HistoryEntry>,
    pub document: Option<Document>,
    pub reading_list_page: Option<ReadingListPage>,
}

impl PageViewModel {
    pub fn for_load(reference: DocumentReference, entry: HistoryEntry) -> Self {
        Self {
            reference: Some(reference.clone()),
            original_reference: Some(reference),
            entry: Some(entry),
            document: None,
            reading_list_page: None,
        }
    }

    pub fn is_in_reading_list(&self) -> bool {
        self.reading_list_page.is_some()
    }

    pub fn is_article(&self) -> bool {
        self.document.as_ref().is_some_and(|d| d.is_article)
    }
}
