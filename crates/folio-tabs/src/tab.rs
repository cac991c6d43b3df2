use folio_common::TabId;
use serde::{Deserialize, Serialize};

use crate::backstack::{BackStack, BackStackItem};

/// One browsing tab: a stable identity and its own history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub back_stack: BackStack,
}

impl Tab {
    /// A tab with an empty backstack. Only valid until the first push.
    pub fn new() -> Self {
        Self {
            id: TabId::new(),
            back_stack: BackStack::new(),
        }
    }

    pub fn with_item(item: BackStackItem) -> Self {
        let mut tab = Self::new();
        tab.back_stack.push(item);
        tab
    }

    /// The document this tab currently shows, if any.
    pub fn current(&self) -> Option<&BackStackItem> {
        self.back_stack.peek_top()
    }
}

impl Default for Tab {
    fn default() -> Self {
        Self::new()
    }
}
