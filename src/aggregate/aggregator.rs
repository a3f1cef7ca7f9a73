//! Aggregator implementation

use crate::page::{HitRecord, Page, PageSummary};
use crate::retry::FetchOutcome;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Aggregate result of one search
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResult {
    /// Analytics identifier from the probe response
    pub analytics_id: Option<String>,
    /// Total results reported by the server
    pub total_results: u64,
    /// Extracted hit records
    pub messages: Vec<HitRecord>,
}

impl SearchResult {
    /// Result carrying only summary fields
    pub fn from_summary(summary: PageSummary) -> Self {
        Self {
            analytics_id: summary.analytics_id,
            total_results: summary.total_results,
            messages: Vec::new(),
        }
    }

    /// Number of hit records
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if no hit records were collected
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate over the hit records
    pub fn iter(&self) -> std::slice::Iter<'_, HitRecord> {
        self.messages.iter()
    }
}

impl IntoIterator for SearchResult {
    type Item = HitRecord;
    type IntoIter = std::vec::IntoIter<HitRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

/// Single-writer accumulator for a search
///
/// Concurrent fetches never write here directly: their outcomes are merged
/// by the owner once the whole batch has completed.
#[derive(Debug)]
pub struct ResultAggregator {
    summary: PageSummary,
    messages: Vec<HitRecord>,
}

impl ResultAggregator {
    /// Start an aggregate with the probe's summary fields
    pub fn new(summary: PageSummary) -> Self {
        Self {
            summary,
            messages: Vec::new(),
        }
    }

    /// Summary fields
    pub fn summary(&self) -> &PageSummary {
        &self.summary
    }

    /// Append the hits of one page; returns how many were added
    pub fn add_page(&mut self, page: &Page) -> usize {
        let before = self.messages.len();
        self.messages.extend(page.hits().cloned().map(HitRecord::from));
        self.messages.len() - before
    }

    /// Merge the outcomes of a completed batch, in the given order
    pub fn merge_batch(&mut self, outcomes: Vec<FetchOutcome>) -> usize {
        let pages = outcomes.len();
        let added: usize = outcomes
            .iter()
            .map(|outcome| self.add_page(&outcome.page))
            .sum();
        debug!("Merged batch of {} page(s), {} hit(s)", pages, added);
        added
    }

    /// Hit records collected so far
    pub fn hit_count(&self) -> usize {
        self.messages.len()
    }

    /// Freeze into the final result
    pub fn finish(self) -> SearchResult {
        SearchResult {
            analytics_id: self.summary.analytics_id,
            total_results: self.summary.total_results,
            messages: self.messages,
        }
    }
}
