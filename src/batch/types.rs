//! Batch scheduling types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the delay between batches is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    /// Always wait the configured delay
    #[default]
    Fixed,
    /// Wait the configured delay or the largest throttle delay the
    /// previous batch reported, whichever is longer
    Adaptive,
}

/// Configuration for the batch scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Tasks per batch
    pub rate: usize,
    /// Delay between consecutive batches
    pub sleep: Duration,
    /// Delay selection
    pub pacing: Pacing,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            rate: 5,
            sleep: Duration::from_secs(3),
            pacing: Pacing::Fixed,
        }
    }
}

/// Task output that may report a server throttle delay
pub trait Throttled {
    /// Delay the server asked for while producing this output
    fn throttle_delay(&self) -> Option<Duration> {
        None
    }
}

/// Statistics from a scheduler run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleStats {
    /// Batches executed
    pub batches: usize,
    /// Sizes of the executed batches, in order
    pub batch_sizes: Vec<usize>,
    /// Total time spent pausing between batches
    pub total_delay: Duration,
}

impl ScheduleStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed batch
    pub fn add_batch(&mut self, size: usize) {
        self.batches += 1;
        self.batch_sizes.push(size);
    }

    /// Record an inter-batch pause
    pub fn add_delay(&mut self, delay: Duration) {
        self.total_delay += delay;
    }
}
