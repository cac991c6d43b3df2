//! Renderer presentation settings sent over the bridge.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Height in pixels of the fixed chrome above the content (valid range: 0-400).
    pub decor_offset: u32,
    pub dark_mode: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decor_offset: 56,
            dark_mode: false,
        }
    }
}
