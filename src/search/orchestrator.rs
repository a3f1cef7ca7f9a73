//! Search orchestrator

use super::plan::PagePlan;
use super::types::SearchStats;
use crate::aggregate::{ResultAggregator, SearchResult};
use crate::batch::BatchScheduler;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, Transport};
use crate::page::PageSummary;
use crate::query::{SearchQuery, UrlBuilder};
use crate::retry::{FetchOutcome, RetryPolicy};
use std::time::Instant;
use tracing::{debug, info};

/// Runs searches against one transport
///
/// The transport is shared read-only by every concurrent fetch of a
/// search; each search call is independent and one-shot.
#[derive(Debug)]
pub struct SearchOrchestrator<T> {
    transport: T,
    urls: UrlBuilder,
    retry: RetryPolicy,
}

impl SearchOrchestrator<HttpClient> {
    /// Build an HTTP-backed orchestrator from client settings
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpClient::with_config(config.http_config())?;
        let urls = UrlBuilder::new(&config.api_base)?;
        Ok(Self::new(transport, urls))
    }
}

impl<T: Transport> SearchOrchestrator<T> {
    /// Create an orchestrator over a transport
    pub fn new(transport: T, urls: UrlBuilder) -> Self {
        Self {
            transport,
            urls,
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Get the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get the URL builder
    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    /// Run a search and return the aggregate result
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        self.search_with_stats(query).await.map(|(result, _)| result)
    }

    /// Run a search and also report what it cost
    pub async fn search_with_stats(
        &self,
        query: &SearchQuery,
    ) -> Result<(SearchResult, SearchStats)> {
        let start = Instant::now();
        let options = &query.options;
        options.validate()?;

        let target = self.urls.build(query)?;
        let mut stats = SearchStats::new();
        info!("Searching {}", target);

        // Probing
        let probe = self.retry.fetch(&self.transport, &target).await?;
        stats.add_page(probe.attempts, probe.was_throttled());
        let summary = PageSummary::from_document(probe.page.document())?;
        debug!(
            "Probe reported {} result(s), analytics_id={:?}",
            summary.total_results, summary.analytics_id
        );

        if !options.messages {
            stats.elapsed = start.elapsed();
            return Ok((SearchResult::from_summary(summary), stats));
        }

        // ValidatingLimit
        let plan = PagePlan::new(summary.total_results, options.limit)?;
        let mut aggregator = ResultAggregator::new(summary);
        aggregator.add_page(&probe.page);

        // Paging
        if plan.needs_paging() {
            let scheduler = BatchScheduler::new(options.batch_config())?;
            let targets = plan
                .offsets
                .iter()
                .map(|offset| UrlBuilder::with_offset(&target, *offset))
                .collect::<Result<Vec<_>>>()?;

            debug!(
                "Fetching {} more page(s) in batches of {}",
                targets.len(),
                options.rate
            );

            let transport = &self.transport;
            let retry = self.retry;
            let schedule = scheduler
                .run(
                    targets,
                    move |page_target: String| async move {
                        retry.fetch(transport, &page_target).await
                    },
                    |outcomes: Vec<FetchOutcome>| {
                        for outcome in &outcomes {
                            stats.add_page(outcome.attempts, outcome.was_throttled());
                        }
                        aggregator.merge_batch(outcomes);
                        debug!("{} hit(s) collected so far", aggregator.hit_count());
                    },
                )
                .await?;
            stats.batches = schedule.batches;
            stats.batch_sizes = schedule.batch_sizes;
            stats.paused = schedule.total_delay;
        }

        let result = aggregator.finish();
        stats.hits = result.len();
        stats.elapsed = start.elapsed();

        info!(
            "Search finished: {} hit(s) from {} page(s) in {:?}",
            stats.hits, stats.pages_fetched, stats.elapsed
        );

        Ok((result, stats))
    }
}
