pub mod actions;
pub mod errors;
pub mod id;
pub mod types;

pub use actions::PageAction;
pub use errors::{BridgeError, ConfigError, FolioError, NavError, PersistError};
pub use id::{new_id, TabId};
pub use types::{DocumentReference, HistoryEntry, HistorySource, Namespace, WIKI_PATH_PREFIX};

pub type Result<T> = std::result::Result<T, FolioError>;
