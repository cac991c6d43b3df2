//! Reading-time stopwatch for the visible document.

use std::time::{Duration, Instant};

/// Accumulates time only while running. Pausing keeps the total.
#[derive(Debug, Clone)]
pub struct ActiveTimer {
    started: Option<Instant>,
    accumulated: Duration,
}

impl ActiveTimer {
    /// A running timer starting now.
    pub fn new() -> Self {
        Self {
            started: Some(Instant::now()),
            accumulated: Duration::ZERO,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn pause(&mut self) {
        if let Some(start) = self.started.take() {
            self.accumulated += start.elapsed();
        }
    }

    pub fn resume(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    /// Zero the total and keep running.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.started = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Duration {
        self.accumulated + self.started.map(|s| s.elapsed()).unwrap_or_default()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed().as_secs()
    }

    #[cfg(test)]
    pub(crate) fn advance(&mut self, by: Duration) {
        self.accumulated += by;
    }
}

impl Default for ActiveTimer {
    fn default() -> Self {
        Self::new()
    }
}
