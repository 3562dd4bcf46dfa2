//! Core TOML config loading: read from path or platform default.

use crate::schema::OmniConfig;
use crate::validation;
use omni_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. A validation failure is
/// logged and the parsed config is returned as-is.
pub fn load_from_path(path: &Path) -> Result<OmniConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: OmniConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!(error = %e, "config failed validation, continuing with parsed values");
    }

    info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// If the file does not exist, writes the commented template there and
/// returns defaults.
pub fn load_default() -> Result<OmniConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!(path = %path.display(), "no config found, creating default");
        create_default_config(&path)?;
        return Ok(OmniConfig::default());
    }
    load_from_path(&path)
}
