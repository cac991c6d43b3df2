//! Typed vocabulary carried over the bridge.

use folio_common::BridgeError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::ipc::BridgeMessage;

pub const LINK_CLICKED: &str = "linkClicked";
pub const REFERENCE_CLICKED: &str = "referenceClicked";
pub const IMAGE_CLICKED: &str = "imageClicked";
pub const MEDIA_CLICKED: &str = "mediaClicked";
pub const IPA_SPAN: &str = "ipaSpan";

pub const SET_DECOR_OFFSET: &str = "setDecorOffset";
pub const HANDLE_REFERENCE: &str = "handleReference";
pub const TOGGLE_DARK_MODE: &str = "toggleDarkMode";

/// Every name the renderer may post.
pub const RENDERER_MESSAGE_NAMES: &[&str] = &[
    LINK_CLICKED,
    REFERENCE_CLICKED,
    IMAGE_CLICKED,
    MEDIA_CLICKED,
    IPA_SPAN,
];

// =============================================================================
// RENDERER -> HOST
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct LinkPayload {
    href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ReferencePayload {
    #[serde(rename = "ref")]
    html: String,
    #[serde(rename = "linkText", default)]
    link_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ImagePayload {
    href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct IpaPayload {
    contents: String,
}

/// An event the renderer raised.
#[derive(Debug, Clone, PartialEq)]
pub enum RendererMessage {
    LinkClicked { href: String },
    ReferenceClicked { html: String, link_text: String },
    ImageClicked { href: String, title: Option<String> },
    MediaClicked { href: String },
    IpaSpan { contents: String },
}

fn decode_payload<T: DeserializeOwned>(
    name: &str,
    payload: serde_json::Value,
) -> Result<T, BridgeError> {
    serde_json::from_value(payload).map_err(|source| BridgeError::Decode {
        name: name.to_string(),
        source,
    })
}

impl RendererMessage {
    /// Decode a raw bridge message. Unknown names yield `Ok(None)`; a known
    /// name with a malformed payload is a [`BridgeError::Decode`].
    pub fn from_bridge(msg: &BridgeMessage) -> Result<Option<Self>, BridgeError> {
        let payload = msg.payload.clone();
        let decoded = match msg.kind.as_str() {
            LINK_CLICKED => {
                let p: LinkPayload = decode_payload(&msg.kind, payload)?;
                Self::LinkClicked { href: p.href }
            }
            REFERENCE_CLICKED => {
                let p: ReferencePayload = decode_payload(&msg.kind, payload)?;
                Self::ReferenceClicked {
                    html: p.html,
                    link_text: p.link_text,
                }
            }
            IMAGE_CLICKED => {
                let p: ImagePayload = decode_payload(&msg.kind, payload)?;
                Self::ImageClicked {
                    href: p.href,
                    title: p.title,
                }
            }
            MEDIA_CLICKED => {
                let p: LinkPayload = decode_payload(&msg.kind, payload)?;
                Self::MediaClicked { href: p.href }
            }
            IPA_SPAN => {
                let p: IpaPayload = decode_payload(&msg.kind, payload)?;
                Self::IpaSpan { contents: p.contents }
            }
            _ => return Ok(None),
        };
        Ok(Some(decoded))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::LinkClicked { .. } => LINK_CLICKED,
            Self::ReferenceClicked { .. } => REFERENCE_CLICKED,
            Self::ImageClicked { .. } => IMAGE_CLICKED,
            Self::MediaClicked { .. } => MEDIA_CLICKED,
            Self::IpaSpan { .. } => IPA_SPAN,
        }
    }

    /// Encode as the renderer would post it.
    pub fn to_bridge(&self) -> BridgeMessage {
        let payload = match self {
            Self::LinkClicked { href } | Self::MediaClicked { href } => json!({ "href": href }),
            Self::ReferenceClicked { html, link_text } => {
                json!({ "ref": html, "linkText": link_text })
            }
            Self::ImageClicked { href, title } => match title {
                Some(title) => json!({ "href": href, "title": title }),
                None => json!({ "href": href }),
            },
            Self::IpaSpan { contents } => json!({ "contents": contents }),
        };
        BridgeMessage::new(self.name(), payload)
    }
}

// =============================================================================
// HOST -> RENDERER
// =============================================================================

/// A message the host sends into the page.
#[derive(Debug, Clone, PartialEq)]
pub enum HostMessage {
    /// Top padding the page reserves for the toolbar.
    SetDecorOffset { offset: u32 },
    /// Scroll to an in-page anchor.
    HandleReference { anchor: String },
    ToggleDarkMode { enabled: bool },
}

impl HostMessage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetDecorOffset { .. } => SET_DECOR_OFFSET,
            Self::HandleReference { .. } => HANDLE_REFERENCE,
            Self::ToggleDarkMode { .. } => TOGGLE_DARK_MODE,
        }
    }

    pub fn payload(&self) -> serde_json::Value {
        match self {
            Self::SetDecorOffset { offset } => json!({ "offset": offset }),
            Self::HandleReference { anchor } => json!({ "anchor": anchor }),
            Self::ToggleDarkMode { enabled } => json!({ "enabled": enabled }),
        }
    }
}
