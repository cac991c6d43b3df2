//! Navigation and content-loading core of the page surface.
//!
//! - [`PageLoadStateMachine`] sequences loads with generation-tagged
//!   completions
//! - [`LinkRouter`] and [`LinkTarget`] classify clicked links
//! - [`Navigator`] owns the tabs, the state machine and the bridge sender,
//!   and turns renderer messages into navigation
//! - [`HostEvent`] is everything the presentation layer is asked to do

pub mod affordances;
pub mod error;
pub mod host;
pub mod link;
pub mod load_state;
pub mod model;
pub mod session;
pub mod timer;

pub use affordances::Affordances;
pub use error::{ErrorKind, FetchError};
pub use host::{HostEvent, HostPort};
pub use link::{LinkRoute, LinkRouter, LinkTarget, OfflineStore};
pub use load_state::{LoadRequest, LoadState, LoadTicket, PageLoadStateMachine, PopOutcome};
pub use model::{Document, PageViewModel, ReadingListPage, Section};
pub use session::{BackOutcome, Navigator, NavigatorOptions};
pub use timer::ActiveTimer;
