use omni_common::TabId;
use serde::{Deserialize, Serialize};

/// One open tab, as the shell reports it. Order in the snapshot is the
/// left-to-right tab order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRecord {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub is_incognito: bool,
}

impl TabRecord {
    pub fn new(name: &str, url: &str, is_incognito: bool) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            is_incognito,
        }
    }

    pub fn id(&self) -> TabId {
        TabId::derive(&self.name, self.is_incognito)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSnapshot {
    pub tabs: Vec<TabRecord>,
    pub active: Option<TabId>,
}

impl SessionSnapshot {
    /// The tab to activate after a restore: the saved active tab if it is
    /// still in the list, else the first tab.
    pub fn resolve_active(&self) -> Option<TabId> {
        let ids: Vec<TabId> = self.tabs.iter().map(TabRecord::id).collect();
        match &self.active {
            Some(active) if ids.contains(active) => Some(active.clone()),
            _ => ids.into_iter().next(),
        }
    }

    /// Drop later entries whose id repeats an earlier one.
    pub fn dedup(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.tabs.retain(|t| seen.insert(t.id()));
    }
}
