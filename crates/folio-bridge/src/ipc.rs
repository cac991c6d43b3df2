//! Wire format of the renderer channel.
//!
//! Messages flow in both directions:
//! - **Renderer -> host**: the page calls `window.folio.bridge.send(kind, payload)`,
//!   which posts `{"kind": ..., "payload": ...}` as a JSON string.
//! - **Host -> renderer**: the host evaluates
//!   `window.folio.bridge._dispatch(kind, payload)` in the page.

use serde::{Deserialize, Serialize};

/// One named message with a JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeMessage {
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl BridgeMessage {
    pub fn new(kind: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// Parse a message from the raw string the renderer posted.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// JavaScript that installs the renderer half of the bridge.
/// The renderer injects it before any page script runs.
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(function() {
    window.folio = window.folio || {};
    window.folio.bridge = {
        send: function(kind, payload) {
            window.ipc.postMessage(JSON.stringify({
                kind: kind,
                payload: payload || {}
            }));
        },
        // One callback per message name; a later registration wins.
        _handlers: {},
        on: function(kind, callback) {
            this._handlers[kind] = callback;
        },
        _dispatch: function(kind, payload) {
            var handler = this._handlers[kind];
            if (handler) {
                handler(payload);
            }
        }
    };
})();
"#;

/// Script that delivers one host message to the renderer's handler.
pub fn js_dispatch_message(kind: &str, payload: &serde_json::Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.folio.bridge._dispatch({}, {});",
        serde_json::to_string(kind).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}
