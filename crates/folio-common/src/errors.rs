use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Contract violations on the tab set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("tab position {position} is out of range (tab count {len})")]
    IndexOutOfRange { position: usize, len: usize },

    #[error("the browsing session has ended")]
    SessionEnded,
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("message payload could not be serialized: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("payload for '{name}' could not be decoded: {source}")]
    Decode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("payload for '{name}' is not a key-value object")]
    PayloadNotObject { name: String },

    #[error("renderer rejected script: {0}")]
    Script(String),

    #[error("bridge channel is closed")]
    ChannelClosed,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("session state format error: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Nav(#[from] NavError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("tabs.max_tabs = 0".into());
        assert_eq!(err.to_string(), "config validation error: tabs.max_tabs = 0");
    }

    #[test]
    fn nav_error_display() {
        let err = NavError::IndexOutOfRange {
            position: 7,
            len: 3,
        };
        assert_eq!(
            err.to_string(),
            "tab position 7 is out of range (tab count 3)"
        );
        assert_eq!(
            NavError::SessionEnded.to_string(),
            "the browsing session has ended"
        );
    }

    #[test]
    fn bridge_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: BridgeError = serde_err.into();
        assert!(matches!(err, BridgeError::Payload(_)));

        let err = BridgeError::PayloadNotObject {
            name: "setDecorOffset".into(),
        };
        assert_eq!(
            err.to_string(),
            "payload for 'setDecorOffset' is not a key-value object"
        );
    }

    #[test]
    fn bridge_decode_error_names_message() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = BridgeError::Decode {
            name: "imageClicked".into(),
            source,
        };
        assert!(err
            .to_string()
            .starts_with("payload for 'imageClicked' could not be decoded: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn folio_error_from_nav() {
        let nav_err = NavError::IndexOutOfRange {
            position: 1,
            len: 1,
        };
        let err: FolioError = nav_err.into();
        assert!(matches!(err, FolioError::Nav(_)));
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn folio_error_from_persist() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "state missing");
        let err: FolioError = PersistError::from(io_err).into();
        assert!(matches!(err, FolioError::Persist(_)));
        assert!(err.to_string().contains("state missing"));
    }

    #[test]
    fn folio_error_from_bridge() {
        let err: FolioError = BridgeError::ChannelClosed.into();
        assert!(matches!(err, FolioError::Bridge(BridgeError::ChannelClosed)));
        assert_eq!(err.to_string(), "bridge channel is closed");
    }
}
