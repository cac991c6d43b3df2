//! Visit records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DocumentReference;

/// How the user arrived at a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistorySource {
    InternalLink,
    ExternalLink,
    History,
    Search,
    Random,
    MainPage,
    ReadingList,
    LinkPreview,
    NewTab,
    Restored,
}

/// One visit to a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub reference: DocumentReference,
    pub timestamp: DateTime<Utc>,
    pub source: HistorySource,
    /// Seconds of active reading on this visit.
    pub time_spent_sec: u64,
}

impl HistoryEntry {
    pub fn new(reference: DocumentReference, source: HistorySource) -> Self {
        Self {
            reference,
            timestamp: Utc::now(),
            source,
            time_spent_sec: 0,
        }
    }

    /// Record the reading timer's total for this visit and bump the timestamp.
    /// The timer accumulates across pauses, so this replaces rather than adds.
    pub fn record_time_spent(&mut self, total_sec: u64) {
        self.time_spent_sec = total_sec;
        self.timestamp = Utc::now();
    }
}
