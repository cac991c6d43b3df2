//! Full configuration validation.
//!
//! Validates numeric ranges and required strings, collecting every problem
//! into a single `ConfigError`.

mod helpers;


use crate::schema::FolioConfig;
use folio_common::ConfigError;

use helpers::{validate_non_empty, validate_range};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &FolioConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range(&mut errors, "tabs.max_tabs", config.tabs.max_tabs, 1, 500);
    validate_range(
        &mut errors,
        "display.decor_offset",
        config.display.decor_offset as usize,
        0,
        400,
    );
    validate_non_empty(&mut errors, "content.site", &config.content.site);
    validate_non_empty(&mut errors, "content.main_page", &config.content.main_page);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
