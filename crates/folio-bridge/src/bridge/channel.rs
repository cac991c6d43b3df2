//! Shared queues behind the bridge, and the two handles that feed them.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use folio_common::BridgeError;
use serde::Serialize;
use tracing::{debug, warn};

use crate::ipc::BridgeMessage;
use crate::messages::HostMessage;

/// Queues shared between the control thread and renderer threads.
#[derive(Debug)]
pub(crate) struct Channel {
    /// Validated renderer posts awaiting dispatch.
    pub(crate) inbound: VecDeque<BridgeMessage>,
    /// Host messages awaiting delivery to the renderer.
    pub(crate) outbound: VecDeque<BridgeMessage>,
    pub(crate) open: bool,
}

impl Channel {
    pub(crate) fn new() -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self {
            inbound: VecDeque::new(),
            outbound: VecDeque::new(),
            open: true,
        }))
    }
}

/// Host side sending handle. Cheap to clone; every clone feeds the same
/// ordered outbound queue.
#[derive(Debug, Clone)]
pub struct BridgeSender {
    pub(crate) channel: Arc<Mutex<Channel>>,
}

impl BridgeSender {
    /// Queue a message for the renderer. The payload must serialize to a
    /// JSON object. After teardown the message is dropped.
    pub fn send<T: Serialize>(&self, name: &str, payload: &T) -> Result<(), BridgeError> {
        let value = serde_json::to_value(payload)?;
        if !value.is_object() {
            return Err(BridgeError::PayloadNotObject {
                name: name.to_string(),
            });
        }
        let mut channel = self.channel.lock().map_err(|_| BridgeError::ChannelClosed)?;
        if !channel.open {
            debug!(name, "bridge closed, dropping outbound message");
            return Ok(());
        }
        channel.outbound.push_back(BridgeMessage::new(name, value));
        Ok(())
    }

    pub fn send_message(&self, msg: &HostMessage) -> Result<(), BridgeError> {
        self.send(msg.name(), &msg.payload())
    }

    /// Number of messages waiting to be flushed.
    pub fn pending(&self) -> usize {
        self.channel.lock().map(|c| c.outbound.len()).unwrap_or(0)
    }
}

/// Renderer side posting handle. `Send + Sync`, so renderer callbacks on
/// any thread can hold a clone.
#[derive(Debug, Clone)]
pub struct RendererEndpoint {
    pub(crate) channel: Arc<Mutex<Channel>>,
}

impl RendererEndpoint {
    /// Accept a raw post from the renderer. Returns whether it was queued.
    pub fn post(&self, raw: &str) -> bool {
        let Some(msg) = BridgeMessage::from_json(raw) else {
            warn!(body_len = raw.len(), "renderer message rejected: invalid JSON");
            return false;
        };
        let Ok(mut channel) = self.channel.lock() else {
            return false;
        };
        if !channel.open {
            debug!(kind = %msg.kind, "bridge closed, dropping renderer message");
            return false;
        }
        debug!(kind = %msg.kind, body_len = raw.len(), "renderer message queued");
        channel.inbound.push_back(msg);
        true
    }

    pub fn post_message(&self, msg: &BridgeMessage) -> bool {
        self.post(&msg.to_json())
    }
}
