//! Layout engine types and configuration.

use omni_common::types::Rect;
use omni_common::TabId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Single,
    Split,
}

impl LayoutMode {
    pub fn is_split(self) -> bool {
        self == LayoutMode::Split
    }
}

/// Heights of the bands reserved for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bands {
    pub header: u32,
    pub footer: u32,
}

impl Default for Bands {
    fn default() -> Self {
        Self {
            header: 70,
            footer: 0,
        }
    }
}

/// Computes placements for the visible contexts.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    pub bands: Bands,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub id: TabId,
    pub rect: Rect,
}

/// Result of a reconcile pass: everything currently attached is detached
/// first, then `attach` is applied in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutPlan {
    pub detach: Vec<TabId>,
    pub attach: Vec<Placement>,
}
