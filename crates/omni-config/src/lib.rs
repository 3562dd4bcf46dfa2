//! Omni configuration and persisted state.
//!
//! Provides the TOML configuration (every section defaults, so partial
//! files work), its validation, the built-in service catalog, and the
//! JSON documents that survive restarts: the open tab list and the
//! window geometry.

pub mod schema;
pub mod state;
pub mod toml_loader;
pub mod validation;

pub use schema::{OmniConfig, ServiceEntry, CONFIG_SCHEMA_VERSION};
pub use state::{SessionSnapshot, TabRecord, WindowGeometry};

use omni_common::ConfigError;
use std::path::Path;

/// Load config from an explicit path, or from the platform default path
/// (creating it from the template when missing).
pub fn load_config(path: Option<&Path>) -> Result<OmniConfig, ConfigError> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            toml_loader::load_from_path(path)
        }
        None => toml_loader::load_default(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &OmniConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
