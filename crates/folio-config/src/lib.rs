//! folio configuration system.
//!
//! TOML-based configuration with validation. All config sections use
//! defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use folio_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("up to {} tabs", config.tabs.max_tabs);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::FolioConfig;
pub use toml_loader::{default_data_dir, load_from_path};

use std::path::Path;

use folio_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates a commented default `config.toml` if none exists.
pub fn load_config() -> Result<FolioConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path and validate it.
pub fn load_config_from(path: &Path) -> Result<FolioConfig, ConfigError> {
    let config = load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}
