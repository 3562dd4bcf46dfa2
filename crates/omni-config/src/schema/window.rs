//! Host window settings.

use serde::{Deserialize, Serialize};

/// Window size limits and first-run geometry. Saved geometry in the data
/// directory takes precedence over the defaults here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub default_width: u32,
    pub default_height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub start_maximized: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Omni".into(),
            default_width: 1300,
            default_height: 900,
            min_width: 800,
            min_height: 600,
            start_maximized: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: WindowConfig = toml::from_str("min_width = 1024").unwrap();
        assert_eq!(config.min_width, 1024);
        assert_eq!(config.min_height, 600);
        assert!(config.start_maximized);
    }
}
