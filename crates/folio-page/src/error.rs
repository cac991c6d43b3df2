//! Fetch failures and how the page surface presents them.

use serde::{Deserialize, Serialize};

/// Failure reported by the fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// No connection to the content source.
    #[error("content source unreachable: {0}")]
    Unreachable(String),

    #[error("content source returned {code}: {message}")]
    Status { code: u16, message: String },

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("{0}")]
    Other(String),
}

impl FetchError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Status {
            code: 404,
            message: message.into(),
        }
    }
}

/// Presentation class of a failed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Offline,
    NotFound,
    Generic,
}

impl ErrorKind {
    pub fn classify(error: &FetchError) -> Self {
        match error {
            FetchError::Unreachable(_) => Self::Offline,
            FetchError::Status { code: 404, .. } => Self::NotFound,
            _ => Self::Generic,
        }
    }

    /// Whether pull-to-refresh stays available on the error screen.
    pub fn allows_refresh(self) -> bool {
        self != Self::NotFound
    }
}
