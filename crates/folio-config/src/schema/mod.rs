//! Configuration schema types for folio.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults below.

mod display;
mod links;
mod session;
mod system;
mod tabs;

pub use display::*;
pub use links::*;
pub use session::*;
pub use system::*;
pub use tabs::*;

use serde::{Deserialize, Serialize};

/// Root configuration for folio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub tabs: TabsConfig,
    pub links: LinksConfig,
    pub session: SessionConfig,
    pub content: ContentConfig,
    pub display: DisplayConfig,
    pub onboarding: OnboardingConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
