pub mod backstack;
pub mod manager;
pub mod persist;
pub mod tab;

pub use backstack::{BackStack, BackStackItem, PushOutcome};
pub use manager::{AddOutcome, CloseOutcome, SelectOutcome, TabManager, TabPlacement, TabSet};
pub use tab::Tab;
