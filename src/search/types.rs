//! Search statistics

use std::time::Duration;

/// Statistics from one search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Pages fetched, probe included
    pub pages_fetched: usize,
    /// Requests issued, retries included
    pub requests: usize,
    /// Pages that received at least one throttle signal
    pub throttled_pages: usize,
    /// Batches executed after the probe
    pub batches: usize,
    /// Pages in each batch, in execution order
    pub batch_sizes: Vec<usize>,
    /// Time spent pausing between batches
    pub paused: Duration,
    /// Hit records returned
    pub hits: usize,
    /// Wall-clock duration
    pub elapsed: Duration,
}

impl SearchStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page
    pub fn add_page(&mut self, attempts: u32, throttled: bool) {
        self.pages_fetched += 1;
        self.requests += attempts as usize;
        if throttled {
            self.throttled_pages += 1;
        }
    }
}
