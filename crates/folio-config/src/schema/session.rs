//! Session persistence and content source configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the tab set is saved between runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// Override for the session state file. Defaults to the platform data dir.
    pub state_file: Option<PathBuf>,
}

/// Local document store used as the fetch source and offline store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Root of the document store. Defaults to the platform data dir.
    pub dir: Option<PathBuf>,
    /// Site new references are resolved against.
    pub site: String,
    /// Document opened in a fresh tab.
    pub main_page: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: None,
            site: "en.wikipedia.org".into(),
            main_page: "Main Page".into(),
        }
    }
}
