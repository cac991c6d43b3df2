//! Save and restore the tab set as JSON on disk.
//!
//! Writes go to a `.tmp` sibling first and are renamed into place, so an
//! interrupted save leaves the previous session intact.

use std::path::Path;

use folio_common::PersistError;

use crate::manager::TabSet;

/// Write the tab set to `path`, creating parent directories.
pub fn save(set: &TabSet, path: &Path) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(set)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &json)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        tracing::warn!("atomic rename failed ({}), falling back to direct write", e);
        std::fs::write(path, &json)?;
        let _ = std::fs::remove_file(&tmp_path);
    }

    tracing::info!(path = %path.display(), tabs = set.tabs.len(), "tab state saved");
    Ok(())
}

/// Read a previously saved tab set. A missing file is `Ok(None)`.
pub fn load(path: &Path) -> Result<Option<TabSet>, PersistError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let set: TabSet = serde_json::from_str(&content)?;
    tracing::info!(path = %path.display(), tabs = set.tabs.len(), "tab state loaded");
    Ok(Some(set))
}

/// Forget any saved tabs. Removing a file that is already gone succeeds.
pub fn clear(path: &Path) -> Result<(), PersistError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "tab state cleared");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// TESTS
// =============================================================================
