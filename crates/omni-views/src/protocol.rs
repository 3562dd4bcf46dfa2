//! Typed messages between the shell page and the controller.

use omni_common::TabId;
use omni_config::{ServiceEntry, TabRecord};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::ipc::IpcMessage;

// =============================================================================
// SHELL -> CONTROLLER
// =============================================================================

/// Message kinds the shell may send. Anything else is rejected.
pub const ALLOWED_IPC_KINDS: &[&str] = &[
    "update-layout",
    "add-ai",
    "switch-tab",
    "toggle-split",
    "remove-ai",
    "reload-ai",
    "reload-all-ais",
    "hide-current-view",
    "show-current-view",
    "broadcast-prompt",
    "shell-ready",
    "tabs-changed",
    "reset-tabs",
];

pub fn is_ipc_kind_allowed(kind: &str) -> bool {
    ALLOWED_IPC_KINDS.contains(&kind)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBands {
    pub header_height: u32,
    #[serde(default)]
    pub footer_height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAi {
    pub id: TabId,
    pub url: String,
    #[serde(default)]
    pub is_incognito: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TabRef {
    pub id: TabId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct OptionalTabRef {
    #[serde(default)]
    pub id: Option<TabId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Prompt {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TabsChanged {
    pub tabs: Vec<TabRecord>,
    pub active: Option<TabId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlMessage {
    UpdateLayout(LayoutBands),
    AddAi(AddAi),
    SwitchTab(TabId),
    ToggleSplit,
    RemoveAi(TabId),
    ReloadAi(TabId),
    ReloadAll,
    HideCurrentView,
    ShowCurrentView(Option<TabId>),
    BroadcastPrompt(String),
    ShellReady,
    TabsChanged(TabsChanged),
    /// Close every tab and forget the saved tab list.
    ResetTabs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    Malformed,
    UnknownKind(String),
    BadPayload { kind: String, reason: String },
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolError::Malformed => f.write_str("malformed message"),
            ProtocolError::UnknownKind(kind) => write!(f, "unknown kind: {kind}"),
            ProtocolError::BadPayload { kind, reason } => {
                write!(f, "bad payload for {kind}: {reason}")
            }
        }
    }
}

impl ControlMessage {
    /// Parse a raw IPC body, enforcing the kind allowlist.
    pub fn parse(body: &str) -> Result<Self, ProtocolError> {
        let msg = IpcMessage::from_json(body).ok_or(ProtocolError::Malformed)?;
        Self::from_ipc(&msg)
    }

    pub fn from_ipc(msg: &IpcMessage) -> Result<Self, ProtocolError> {
        if !is_ipc_kind_allowed(&msg.kind) {
            return Err(ProtocolError::UnknownKind(msg.kind.clone()));
        }
        let payload = msg.payload.to_value();
        let kind = msg.kind.as_str();
        let message = match kind {
            "update-layout" => ControlMessage::UpdateLayout(decode(kind, payload)?),
            "add-ai" => ControlMessage::AddAi(decode(kind, payload)?),
            "switch-tab" => ControlMessage::SwitchTab(decode::<TabRef>(kind, payload)?.id),
            "toggle-split" => ControlMessage::ToggleSplit,
            "remove-ai" => ControlMessage::RemoveAi(decode::<TabRef>(kind, payload)?.id),
            "reload-ai" => ControlMessage::ReloadAi(decode::<TabRef>(kind, payload)?.id),
            "reload-all-ais" => ControlMessage::ReloadAll,
            "hide-current-view" => ControlMessage::HideCurrentView,
            "show-current-view" => {
                let target = if payload.is_null() {
                    OptionalTabRef::default()
                } else {
                    decode(kind, payload)?
                };
                ControlMessage::ShowCurrentView(target.id)
            }
            "broadcast-prompt" => {
                ControlMessage::BroadcastPrompt(decode::<Prompt>(kind, payload)?.text)
            }
            "shell-ready" => ControlMessage::ShellReady,
            "tabs-changed" => ControlMessage::TabsChanged(decode(kind, payload)?),
            "reset-tabs" => ControlMessage::ResetTabs,
            other => return Err(ProtocolError::UnknownKind(other.to_string())),
        };
        Ok(message)
    }
}

fn decode<T: serde::de::DeserializeOwned>(kind: &str, payload: Value) -> Result<T, ProtocolError> {
    serde_json::from_value(payload).map_err(|e| ProtocolError::BadPayload {
        kind: kind.to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// CONTROLLER -> SHELL
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
    pub private: bool,
    pub incognito_allowed: bool,
}

impl From<&ServiceEntry> for CatalogEntry {
    fn from(entry: &ServiceEntry) -> Self {
        Self {
            name: entry.name.clone(),
            url: entry.url.clone(),
            private: entry.private,
            incognito_allowed: entry.incognito_allowed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoredTab {
    pub id: TabId,
    pub name: String,
    pub url: String,
    pub is_incognito: bool,
}

impl From<&TabRecord> for RestoredTab {
    fn from(record: &TabRecord) -> Self {
        Self {
            id: record.id(),
            name: record.name.clone(),
            url: record.url.clone(),
            is_incognito: record.is_incognito,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellSignal {
    LoadingStatus { id: TabId, is_loading: bool },
    SplitState { is_active: bool },
    Catalog(Vec<CatalogEntry>),
    RestoreTabs { tabs: Vec<RestoredTab>, active: Option<TabId> },
}

impl ShellSignal {
    pub fn kind(&self) -> &'static str {
        match self {
            ShellSignal::LoadingStatus { .. } => "ai-loading-status",
            ShellSignal::SplitState { .. } => "sync-split-state",
            ShellSignal::Catalog(_) => "catalog",
            ShellSignal::RestoreTabs { .. } => "restore-tabs",
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            ShellSignal::LoadingStatus { id, is_loading } => {
                json!({ "id": id, "isLoading": is_loading })
            }
            ShellSignal::SplitState { is_active } => json!({ "isActive": is_active }),
            ShellSignal::Catalog(services) => json!({ "services": services }),
            ShellSignal::RestoreTabs { tabs, active } => json!({ "tabs": tabs, "active": active }),
        }
    }
}
