//! The TabManager owns the recency-ordered tab set and its size limit.

mod operations;
mod types;

pub use types::*;
