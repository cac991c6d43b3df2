//! Per-tab history of visited documents.

mod operations;
mod types;

pub use types::*;
