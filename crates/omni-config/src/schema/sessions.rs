//! Browsing-context settings shared by every tab.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    /// Namespace for persistent storage partitions.
    pub partition_prefix: String,
    /// Page background painted before content loads.
    pub background_color: String,
    /// Replaces the engine's user agent when set.
    pub user_agent: Option<String>,
    pub devtools: bool,
    /// Let pages open popup windows (sign-in flows).
    pub allow_popups: bool,
    /// Paint a dark background before first paint when the system prefers
    /// a dark color scheme.
    pub dark_flash_fix: bool,
    pub clipboard: bool,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            partition_prefix: "ai_sessions_v2".into(),
            background_color: "#ffffff".into(),
            user_agent: None,
            devtools: cfg!(debug_assertions),
            allow_popups: true,
            dark_flash_fix: true,
            clipboard: true,
        }
    }
}

/// Detection of pages that loaded but refuse service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub probe_blocked_pages: bool,
    /// Body text fragments that mark a block page.
    pub blocked_markers: Vec<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            probe_blocked_pages: true,
            blocked_markers: vec![
                "Sorry, you have been blocked".into(),
                "You are unable to access copilot.microsoft.com".into(),
            ],
        }
    }
}
