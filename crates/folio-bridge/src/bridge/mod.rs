//! The message bridge: handler registry plus shared queues.
//!
//! The renderer posts through a [`RendererEndpoint`] from any thread; the
//! control thread calls [`MessageBridge::dispatch_pending`] to run handlers
//! against its own state, and [`MessageBridge::flush`] to push queued host
//! messages into the page.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use folio_common::BridgeError;
use serde::Serialize;
use tracing::debug;

use crate::ipc::{js_dispatch_message, BridgeMessage};

mod channel;
mod port;

pub use channel::{BridgeSender, RendererEndpoint};
pub use port::RendererPort;

use channel::Channel;

/// Handler for one message name, run with the control thread's state.
pub type Handler<C> = Box<dyn FnMut(&mut C, &BridgeMessage) -> Result<(), BridgeError>>;

/// Bidirectional channel to the renderer with one handler per name.
pub struct MessageBridge<C> {
    handlers: HashMap<String, Handler<C>>,
    channel: Arc<Mutex<Channel>>,
}

impl<C> MessageBridge<C> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            channel: Channel::new(),
        }
    }

    pub fn sender(&self) -> BridgeSender {
        BridgeSender {
            channel: Arc::clone(&self.channel),
        }
    }

    pub fn endpoint(&self) -> RendererEndpoint {
        RendererEndpoint {
            channel: Arc::clone(&self.channel),
        }
    }

    /// Register the handler for `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: &str, handler: F)
    where
        F: FnMut(&mut C, &BridgeMessage) -> Result<(), BridgeError> + 'static,
    {
        if self.handlers.insert(name.to_string(), Box::new(handler)).is_some() {
            debug!(name, "bridge handler replaced");
        }
    }

    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn send<T: Serialize>(&self, name: &str, payload: &T) -> Result<(), BridgeError> {
        self.sender().send(name, payload)
    }

    pub fn is_open(&self) -> bool {
        self.channel.lock().map(|c| c.open).unwrap_or(false)
    }

    /// Run handlers for every queued renderer message, in arrival order.
    /// Messages without a handler are dropped. Stops at the first handler
    /// error, leaving later messages queued. Returns how many were handled.
    pub fn dispatch_pending(&mut self, ctx: &mut C) -> Result<usize, BridgeError> {
        let mut pending = {
            let mut channel = self.channel.lock().map_err(|_| BridgeError::ChannelClosed)?;
            std::mem::take(&mut channel.inbound)
        };

        let mut handled = 0;
        while let Some(msg) = pending.pop_front() {
            let Some(handler) = self.handlers.get_mut(&msg.kind) else {
                debug!(kind = %msg.kind, "no handler registered, dropping message");
                continue;
            };
            if let Err(e) = handler(ctx, &msg) {
                self.requeue_inbound(pending);
                return Err(e);
            }
            handled += 1;
        }
        Ok(handled)
    }

    /// Deliver queued host messages to the renderer, in send order. On a
    /// script failure the undelivered remainder stays queued.
    pub fn flush(&self, port: &mut dyn RendererPort) -> Result<usize, BridgeError> {
        let mut pending = {
            let mut channel = self.channel.lock().map_err(|_| BridgeError::ChannelClosed)?;
            std::mem::take(&mut channel.outbound)
        };

        let mut delivered = 0;
        while let Some(msg) = pending.pop_front() {
            let script = js_dispatch_message(&msg.kind, &msg.payload);
            if let Err(e) = port.evaluate_script(&script) {
                pending.push_front(msg);
                if let Ok(mut channel) = self.channel.lock() {
                    pending.append(&mut channel.outbound);
                    channel.outbound = pending;
                }
                return Err(e);
            }
            delivered += 1;
        }
        Ok(delivered)
    }

    /// Deregister every handler, then close the channel. Later posts and
    /// sends are dropped.
    pub fn cleanup(&mut self) {
        self.handlers.clear();
        if let Ok(mut channel) = self.channel.lock() {
            channel.open = false;
            channel.inbound.clear();
            channel.outbound.clear();
        }
        debug!("bridge torn down");
    }

    fn requeue_inbound(&self, mut rest: std::collections::VecDeque<BridgeMessage>) {
        if let Ok(mut channel) = self.channel.lock() {
            rest.append(&mut channel.inbound);
            channel.inbound = rest;
        }
    }
}

impl<C> Default for MessageBridge<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
