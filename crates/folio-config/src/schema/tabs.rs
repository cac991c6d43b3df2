//! Tab set configuration.

use serde::{Deserialize, Serialize};

/// Upper bound on open tabs; the oldest tab is evicted beyond it.
pub const DEFAULT_MAX_TABS: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Maximum number of open tabs (valid range: 1-500).
    pub max_tabs: usize,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            max_tabs: DEFAULT_MAX_TABS,
        }
    }
}
