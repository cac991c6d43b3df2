//! Link handling configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Show a lightweight preview before navigating to an internal link.
    pub preview_enabled: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            preview_enabled: true,
        }
    }
}
