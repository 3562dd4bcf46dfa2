//! Response header policy.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Hosts (and their subdomains) whose headers are never touched.
    pub trusted_domains: Vec<String>,
    /// Lowercase header names removed from every other response.
    pub stripped_headers: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            trusted_domains: vec![
                "google.com".into(),
                "accounts.google.com".into(),
                "youtube.com".into(),
                "gstatic.com".into(),
            ],
            stripped_headers: vec![
                "x-frame-options".into(),
                "content-security-policy".into(),
                "cross-origin-resource-policy".into(),
                "cross-origin-opener-policy".into(),
                "cross-origin-embedder-policy".into(),
            ],
        }
    }
}
