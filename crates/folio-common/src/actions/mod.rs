//! Document actions offered by the page chrome (action tabs and menu).

use serde::{Deserialize, Serialize};

/// An action the user can take on the currently displayed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageAction {
    AddToReadingList,
    Share,
    ChooseLanguage,
    FindInPage,
    ViewContents,
    ThemeChooser,
}

impl PageAction {
    pub const ALL: [PageAction; 6] = [
        PageAction::AddToReadingList,
        PageAction::Share,
        PageAction::ChooseLanguage,
        PageAction::FindInPage,
        PageAction::ViewContents,
        PageAction::ThemeChooser,
    ];

    /// Human-readable label for menus.
    pub fn label(&self) -> &'static str {
        match self {
            PageAction::AddToReadingList => "Add to reading list",
            PageAction::Share => "Share",
            PageAction::ChooseLanguage => "Read in another language",
            PageAction::FindInPage => "Find in page",
            PageAction::ViewContents => "Contents",
            PageAction::ThemeChooser => "Font and theme",
        }
    }

    /// Actions that only make sense for articles (not other namespaces).
    pub fn requires_article(&self) -> bool {
        matches!(self, PageAction::AddToReadingList | PageAction::Share)
    }
}
