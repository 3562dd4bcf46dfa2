//! Storage partition naming.
//!
//! Persistent partitions are deterministic so a tab reopened after a
//! restart finds its cookies again. Incognito partitions are salted with
//! the creation time and a random suffix, so no two instances ever share
//! storage.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use omni_common::id::new_short_id;
use omni_common::TabId;

const PERSIST_SCHEME: &str = "persist:";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoragePartition {
    name: String,
    persistent: bool,
}

impl StoragePartition {
    pub fn persistent(prefix: &str, id: &TabId) -> Self {
        Self {
            name: format!("{PERSIST_SCHEME}{prefix}_{id}"),
            persistent: true,
        }
    }

    pub fn ephemeral(id: &TabId) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        Self {
            name: format!("incognito_session_{id}_{millis}_{}", new_short_id()),
            persistent: false,
        }
    }

    pub fn for_tab(prefix: &str, id: &TabId, incognito: bool) -> Self {
        if incognito {
            Self::ephemeral(id)
        } else {
            Self::persistent(prefix, id)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// On-disk directory for a persistent partition under `root`.
    /// Ephemeral partitions have none.
    pub fn data_directory(&self, root: &Path) -> Option<PathBuf> {
        if !self.persistent {
            return None;
        }
        let bare = self.name.strip_prefix(PERSIST_SCHEME).unwrap_or(&self.name);
        let dir: String = bare
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        Some(root.join(dir.trim_start_matches('.')))
    }
}
