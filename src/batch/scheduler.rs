//! Batch scheduler implementation

use super::types::{BatchConfig, Pacing, ScheduleStats, Throttled};
use crate::error::{Error, Result};
use futures::future::try_join_all;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Runs tasks in sequential groups of concurrent work
#[derive(Debug, Clone)]
pub struct BatchScheduler {
    config: BatchConfig,
}

impl BatchScheduler {
    /// Create a scheduler; `rate` must be at least 1
    pub fn new(config: BatchConfig) -> Result<Self> {
        if config.rate == 0 {
            return Err(Error::validation("rate must be at least 1"));
        }
        Ok(Self { config })
    }

    /// Partition items into consecutive groups of `rate`
    ///
    /// The last group may be short; it is never padded.
    pub fn plan<I>(&self, items: Vec<I>) -> Vec<Vec<I>> {
        let mut groups = Vec::with_capacity(items.len().div_ceil(self.config.rate));
        let mut iter = items.into_iter().peekable();
        while iter.peek().is_some() {
            groups.push(iter.by_ref().take(self.config.rate).collect());
        }
        groups
    }

    /// Run `task` over every item, one group at a time
    ///
    /// Each group is launched concurrently and awaited in full; its outputs
    /// are passed to `sink` in item order, then the scheduler pauses before
    /// the next group. There is no pause after the last group.
    ///
    /// The first task error aborts the run: the remaining tasks of that
    /// group are dropped and no later group starts.
    pub async fn run<I, T, F, Fut, S>(
        &self,
        items: Vec<I>,
        task: F,
        mut sink: S,
    ) -> Result<ScheduleStats>
    where
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<T>>,
        T: Throttled,
        S: FnMut(Vec<T>),
    {
        let groups = self.plan(items);
        let total = groups.len();
        let mut stats = ScheduleStats::new();

        for (index, group) in groups.into_iter().enumerate() {
            let size = group.len();
            debug!("Starting batch {}/{} with {} task(s)", index + 1, total, size);

            let outputs = try_join_all(group.into_iter().map(&task)).await?;
            let delay = self.delay_after(&outputs);

            stats.add_batch(size);
            sink(outputs);

            if index + 1 < total {
                debug!("Batch {}/{} done, pausing {:?}", index + 1, total, delay);
                tokio::time::sleep(delay).await;
                stats.add_delay(delay);
            }
        }

        Ok(stats)
    }

    /// Pause to take after a batch with these outputs
    pub fn delay_after<T: Throttled>(&self, outputs: &[T]) -> Duration {
        match self.config.pacing {
            Pacing::Fixed => self.config.sleep,
            Pacing::Adaptive => outputs
                .iter()
                .filter_map(Throttled::throttle_delay)
                .fold(self.config.sleep, Duration::max),
        }
    }
}
