//! Reserved band sizes and geometry persistence.

use serde::{Deserialize, Serialize};

/// Header and footer bands kept free for the shell UI, in logical pixels.
/// The shell can change these at runtime via `update-layout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub header_height: u32,
    pub footer_height: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_height: 70,
            footer_height: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Quiet period after the last resize/move before geometry is written.
    pub geometry_debounce_ms: u32,
    /// Reopen the tabs from the previous run.
    pub restore_tabs: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            geometry_debounce_ms: 500,
            restore_tabs: true,
        }
    }
}
