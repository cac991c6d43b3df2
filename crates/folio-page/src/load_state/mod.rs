//! The page-load state machine: `Idle -> Loading -> {Loaded, Error}`.
//!
//! Every issued load carries a generation number. A completion whose
//! generation is not the latest is dropped without touching the model or
//! raising host events, so overlapping fetches resolve to the newest load.

mod operations;
mod types;

pub use types::*;

#[cfg(test)]
mod tests;
