//! Launcher catalog.

use omni_common::TabId;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub name: String,
    pub url: String,
    /// Listed in the launcher's privacy-focused group.
    #[serde(default)]
    pub private: bool,
    /// Some services refuse to work without persistent storage.
    #[serde(default = "default_true")]
    pub incognito_allowed: bool,
}

impl ServiceEntry {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            private: false,
            incognito_allowed: true,
        }
    }

    fn private(mut self) -> Self {
        self.private = true;
        self
    }

    fn no_incognito(mut self) -> Self {
        self.incognito_allowed = false;
        self
    }

    pub fn tab_id(&self, incognito: bool) -> TabId {
        TabId::derive(&self.name, incognito)
    }
}

pub fn default_services() -> Vec<ServiceEntry> {
    vec![
        ServiceEntry::new("ChatGPT", "https://chat.openai.com"),
        ServiceEntry::new("Gemini", "https://gemini.google.com"),
        ServiceEntry::new("Grok", "https://grok.com"),
        ServiceEntry::new("Copilot", "https://copilot.microsoft.com"),
        ServiceEntry::new("Claude", "https://claude.ai").no_incognito(),
        ServiceEntry::new("Perplexity", "https://www.perplexity.ai"),
        ServiceEntry::new("Blackbox", "https://www.blackbox.ai/"),
        ServiceEntry::new("DeepSeek", "https://chat.deepseek.com").no_incognito(),
        ServiceEntry::new("Qwen", "https://chat.qwen.ai/"),
        ServiceEntry::new("Z.ai", "https://chat.z.ai/"),
        ServiceEntry::new(
            "DuckDuckGo",
            "https://duckduckgo.com/?q=DuckDuckGo+AI+Chat&ia=chat",
        )
        .private(),
        ServiceEntry::new("Lumo", "https://lumo.proton.me").private(),
        ServiceEntry::new("Okara", "https://okara.ai/").private(),
    ]
}

/// Prefix `https://` onto user-entered addresses that lack a scheme.
pub fn normalize_service_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
