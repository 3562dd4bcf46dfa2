//! Configuration schema types for Omni.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod broadcast;
mod layout;
mod policy;
mod services;
mod sessions;
mod window;

pub use broadcast::*;
pub use layout::*;
pub use policy::*;
pub use services::*;
pub use sessions::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Omni.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OmniConfig {
    pub window: WindowConfig,
    pub layout: LayoutConfig,
    pub sessions: SessionsConfig,
    pub policy: PolicyConfig,
    pub broadcast: BroadcastConfig,
    pub detection: DetectionConfig,
    pub persistence: PersistenceConfig,
    /// Launcher catalog. A `[[services]]` table in the file replaces the
    /// built-in list entirely.
    pub services: Vec<ServiceEntry>,
}

impl Default for OmniConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            layout: LayoutConfig::default(),
            sessions: SessionsConfig::default(),
            policy: PolicyConfig::default(),
            broadcast: BroadcastConfig::default(),
            detection: DetectionConfig::default(),
            persistence: PersistenceConfig::default(),
            services: default_services(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: OmniConfig = toml::from_str("").unwrap();
        assert_eq!(config.layout.header_height, 70);
        assert_eq!(config.services.len(), default_services().len());
    }

    #[test]
    fn services_table_replaces_catalog() {
        let config: OmniConfig = toml::from_str(
            r#"
[[services]]
name = "Local"
url = "http://localhost:8080"
"#,
        )
        .unwrap();
        assert_eq!(config.services.len(), 1);
        assert_eq!(config.services[0].name, "Local");
        assert!(config.services[0].incognito_allowed);
        assert!(!config.services[0].private);
    }
}
