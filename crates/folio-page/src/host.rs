//! Events the navigation core raises for the presentation layer.

use folio_common::{DocumentReference, HistoryEntry};

use crate::error::ErrorKind;
use crate::model::Section;

/// Something the host UI should do or show.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    // -- Load lifecycle --
    Progress {
        visible: bool,
        indeterminate: bool,
    },
    HideError,
    /// Write the visit record to history storage.
    PersistHistory(HistoryEntry),
    InvalidateMenu,
    SetupToc {
        sections: Vec<Section>,
        first_page: bool,
    },
    /// Point the editor at the loaded document.
    BindEditor(DocumentReference),
    BookmarkChanged {
        saved: bool,
    },
    ScrollTo(i32),
    ScrollToAnchor(String),
    LoadComplete(DocumentReference),
    ShowOnboardingTip,
    HidePageContent,
    ShowError {
        reference: DocumentReference,
        kind: ErrorKind,
    },
    RefreshFinished,

    // -- Link and renderer handling --
    OpenExternal(String),
    ShowLinkPreview(DocumentReference),
    ShowReference {
        html: String,
        link_text: String,
    },
    ShowIpa {
        contents: String,
    },
    OpenGallery {
        filename: String,
    },
    DismissBottomSheet,

    // -- Session --
    TabsChanged {
        count: usize,
    },
    SessionEnded,
}

/// Receiver for host events.
pub trait HostPort {
    fn emit(&mut self, event: HostEvent);
}

impl HostPort for Vec<HostEvent> {
    fn emit(&mut self, event: HostEvent) {
        self.push(event);
    }
}
