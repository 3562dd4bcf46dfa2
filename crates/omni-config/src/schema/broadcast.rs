//! Broadcast ("ask all") timing and per-site submit recipes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadcastConfig {
    /// Delay between filling the input and pressing Enter.
    pub settle_delay_ms: u32,
    /// Delay between keydown/keypress and keyup.
    pub keyup_delay_ms: u32,
    /// Delay after Enter before clicking the send button.
    pub send_button_delay_ms: u32,
    pub sites: Vec<SiteRecipeConfig>,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 100,
            keyup_delay_ms: 50,
            send_button_delay_ms: 200,
            sites: Vec::new(),
        }
    }
}

/// Overrides for sites whose composer the generic heuristics miss.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteRecipeConfig {
    /// Hosts this recipe applies to; subdomains match too.
    pub hosts: Vec<String>,
    /// Tried in order before the generic input selectors.
    pub input_selectors: Vec<String>,
    /// Replaces the generic send-button selector.
    pub send_selector: Option<String>,
}
