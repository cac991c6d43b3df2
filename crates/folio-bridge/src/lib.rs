//! Message channel between the host controller and the content renderer.
//!
//! Provides:
//! - A named, ordered, asynchronous message bridge with one handler per name
//! - A thread-safe endpoint the renderer posts raw JSON through
//! - The typed vocabulary of renderer and host messages
//! - The JavaScript half of the channel

pub mod bridge;
pub mod ipc;
pub mod messages;

pub use bridge::{BridgeSender, MessageBridge, RendererEndpoint, RendererPort};
pub use ipc::{js_dispatch_message, BridgeMessage, BRIDGE_INIT_SCRIPT};
pub use messages::{HostMessage, RendererMessage};
