//! Message envelope between the shell page and Rust.
//!
//! - **JS -> Rust**: `window.omni.ipc.send(kind, payload)` posts
//!   `{"kind": ..., "payload": ...}` through the webview IPC channel.
//! - **Rust -> JS**: [`js_dispatch_message`] builds a script that invokes
//!   the handler registered with `window.omni.ipc.on(kind, fn)`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    pub kind: String,
    #[serde(default)]
    pub payload: IpcPayload,
}

/// Either a bare string or structured JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IpcPayload {
    Text(String),
    Json(serde_json::Value),
    #[default]
    None,
}

impl IpcPayload {
    /// The payload as a JSON value; text becomes a JSON string.
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            IpcPayload::Text(s) => serde_json::Value::String(s.clone()),
            IpcPayload::Json(v) => v.clone(),
            IpcPayload::None => serde_json::Value::Null,
        }
    }
}

impl IpcMessage {
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn json(kind: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            payload: IpcPayload::Json(value),
        }
    }
}

/// Installed in the shell webview before any page script.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    window.omni = window.omni || {};
    window.omni.ipc = {
        send: function(kind, payload) {
            window.ipc.postMessage(JSON.stringify({
                kind: kind,
                payload: payload === undefined ? null : payload
            }));
        },
        _handlers: {},
        on: function(kind, callback) {
            this._handlers[kind] = callback;
        },
        _dispatch: function(kind, payload) {
            var handler = this._handlers[kind];
            if (handler) {
                try { handler(payload); } catch (e) { console.error('[omni] ' + kind, e); }
            }
        }
    };
})();
"#;

pub fn js_dispatch_message(kind: &str, payload: &serde_json::Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.omni && window.omni.ipc._dispatch({}, {});",
        serde_json::to_string(kind).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}
