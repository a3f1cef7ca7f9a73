//! Retry policy implementation

use crate::batch::Throttled;
use crate::error::Result;
use crate::http::Transport;
use crate::page::Page;
use std::time::Duration;
use tracing::{debug, warn};

/// Result of one page fetch after retry handling
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    /// The last page obtained
    pub page: Page,
    /// Number of requests issued for this page
    pub attempts: u32,
    /// Largest `retry_after` seen across all attempts
    pub max_retry_after: Option<Duration>,
}

impl FetchOutcome {
    /// Check if any attempt was throttled
    pub fn was_throttled(&self) -> bool {
        self.max_retry_after.is_some()
    }
}

impl Throttled for FetchOutcome {
    fn throttle_delay(&self) -> Option<Duration> {
        self.max_retry_after
    }
}

/// Wraps a single page fetch with bounded throttle retries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 1 }
    }
}

impl RetryPolicy {
    /// Single bounded retry
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow up to `max_retries` reissues after throttle signals
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Maximum number of reissues
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Fetch `target`, waiting out throttle signals
    ///
    /// A transport error on any attempt is returned as-is.
    pub async fn fetch<T: Transport + ?Sized>(
        &self,
        transport: &T,
        target: &str,
    ) -> Result<FetchOutcome> {
        let mut page = Page::classify(transport.get(target).await?);
        let mut attempts = 1;
        let mut max_retry_after = page.retry_after();

        while let Some(delay) = page.retry_after() {
            if attempts > self.max_retries {
                warn!(
                    "Still throttled after {} attempts on {}, keeping last response",
                    attempts, target
                );
                break;
            }

            warn!(
                "Throttled on {}, attempt {}/{}, waiting {:?}",
                target,
                attempts,
                self.max_retries + 1,
                delay
            );
            tokio::time::sleep(delay).await;

            page = Page::classify(transport.get(target).await?);
            attempts += 1;
            max_retry_after = max_retry_after.max(page.retry_after());
        }

        if let Page::Malformed { reason, .. } = &page {
            warn!("Malformed page from {}: {}", target, reason);
        }
        debug!("Fetched {} in {} attempt(s)", target, attempts);

        Ok(FetchOutcome {
            page,
            attempts,
            max_retry_after,
        })
    }
}
