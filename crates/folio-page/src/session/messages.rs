//! Renderer message handling and host-to-renderer styling messages.

use folio_bridge::messages::RENDERER_MESSAGE_NAMES;
use folio_bridge::{BridgeMessage, HostMessage, MessageBridge, RendererMessage};
use folio_common::{BridgeError, WIKI_PATH_PREFIX};
use tracing::{debug, warn};

use crate::host::HostEvent;
use crate::link::LinkTarget;

use super::Navigator;

impl Navigator {
    /// Register this Navigator's handler for every renderer message name.
    pub fn register_handlers(bridge: &mut MessageBridge<Navigator>) {
        for name in RENDERER_MESSAGE_NAMES {
            bridge.register(name, |nav: &mut Navigator, msg: &BridgeMessage| {
                nav.handle_bridge_message(msg)
            });
        }
    }

    /// Send the page its initial styling: toolbar offset and theme.
    pub fn send_initial_style(&mut self) -> Result<(), BridgeError> {
        self.bridge.send_message(&HostMessage::SetDecorOffset {
            offset: self.options.decor_offset,
        })?;
        if self.options.dark_mode {
            self.set_dark_mode(true)?;
        }
        Ok(())
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<(), BridgeError> {
        self.options.dark_mode = enabled;
        self.bridge
            .send_message(&HostMessage::ToggleDarkMode { enabled })
    }

    /// Decode and handle one renderer message. Unknown names and malformed
    /// payloads are logged and dropped.
    pub fn handle_bridge_message(&mut self, msg: &BridgeMessage) -> Result<(), BridgeError> {
        match RendererMessage::from_bridge(msg) {
            Ok(Some(decoded)) => self.handle_renderer_message(decoded),
            Ok(None) => {
                debug!(kind = %msg.kind, "ignoring unknown renderer message");
                Ok(())
            }
            Err(e) => {
                warn!(kind = %msg.kind, error = %e, "dropping malformed renderer message");
                Ok(())
            }
        }
    }

    pub fn handle_renderer_message(&mut self, msg: RendererMessage) -> Result<(), BridgeError> {
        debug!(kind = msg.name(), "renderer message");
        match msg {
            RendererMessage::LinkClicked { href } => {
                self.events.push(HostEvent::DismissBottomSheet);
                match LinkTarget::parse(&href, &self.current_site()) {
                    LinkTarget::Anchor(anchor) => {
                        self.bridge
                            .send_message(&HostMessage::HandleReference { anchor })?;
                    }
                    LinkTarget::Internal(reference) => self.handle_internal_link(reference),
                    LinkTarget::External(url) => self.events.push(HostEvent::OpenExternal(url)),
                }
            }
            RendererMessage::ReferenceClicked { html, link_text } => {
                self.events.push(HostEvent::ShowReference { html, link_text });
            }
            RendererMessage::ImageClicked { href, title } => {
                let decoded = percent_decoded(&href);
                if let Some(filename) = decoded.strip_prefix(WIKI_PATH_PREFIX) {
                    self.events.push(HostEvent::OpenGallery {
                        filename: filename.to_string(),
                    });
                } else {
                    debug!(href = %href, title = ?title, "image link opened externally");
                    self.events.push(HostEvent::OpenExternal(href));
                }
            }
            RendererMessage::MediaClicked { href } => {
                let decoded = percent_decoded(&href);
                let filename = decoded.strip_prefix(WIKI_PATH_PREFIX).unwrap_or(&decoded);
                self.events.push(HostEvent::OpenGallery {
                    filename: filename.replace('_', " "),
                });
            }
            RendererMessage::IpaSpan { contents } => {
                self.events.push(HostEvent::ShowIpa { contents });
            }
        }
        Ok(())
    }
}

/// Percent-decode a renderer href; invalid UTF-8 leaves it as sent.
fn percent_decoded(href: &str) -> String {
    urlencoding::decode(href)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| href.to_string())
}
