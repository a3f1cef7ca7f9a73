//! Result aggregation module
//!
//! Accumulates hit records from completed fetches into one `SearchResult`.
//!
//! The summary fields (`analytics_id`, `total_results`) are taken once from
//! the probe response and never change afterwards. Records are appended in
//! the order batches are merged, so records from earlier batches always
//! precede records from later ones.

mod aggregator;

pub use aggregator::{ResultAggregator, SearchResult};
