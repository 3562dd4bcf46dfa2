//! JSON documents persisted in the data directory between runs.
//!
//! Writes are atomic (write `<name>.tmp`, then rename) so a crash
//! mid-write never leaves a truncated file behind. Readers that cannot
//! use a document fall back to defaults.

mod geometry;
mod tabs;

pub use geometry::{ObservedBounds, WindowGeometry};
pub use tabs::{SessionSnapshot, TabRecord};

use omni_common::StateError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::warn;

pub const WINDOW_STATE_FILE: &str = "window-state.json";
pub const TABS_FILE: &str = "tabs.json";

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StateError> {
    let content = std::fs::read_to_string(path).map_err(|e| StateError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| StateError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Read a document, returning `T::default()` when it is missing or unusable.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    if !path.exists() {
        return T::default();
    }
    match read_json(path) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable state file");
            T::default()
        }
    }
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StateError> {
    let write_err = |reason: String| StateError::Write {
        path: path.to_path_buf(),
        reason,
    };

    let json = serde_json::to_string_pretty(value).map_err(|e| write_err(e.to_string()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
    }

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &json).map_err(|e| write_err(e.to_string()))?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        warn!(error = %e, "atomic rename failed, falling back to direct write");
        std::fs::write(path, &json).map_err(|e2| write_err(e2.to_string()))?;
        let _ = std::fs::remove_file(&tmp_path);
    }

    tracing::debug!(path = %path.display(), "state saved");
    Ok(())
}
