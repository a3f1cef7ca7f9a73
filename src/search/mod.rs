//! Search orchestration module
//!
//! Drives one search end to end.
//!
//! # Protocol
//!
//! ```text
//! Probing ──(messages disabled)──────────────────────────► Done
//!    │
//!    └─► ValidatingLimit ──(fits in one page)────────────► Done
//!              │
//!              └─► Paging (batches of fetches) ──────────► Done
//! ```
//!
//! 1. Build the request target from the query
//! 2. Probe offset 0 to learn `total_results` and `analytics_id`
//! 3. Stop there if message retrieval is disabled
//! 4. Validate the limit and compute the page count
//! 5. Keep the probe's hits; stop if no further page is needed
//! 6. Fetch the remaining offsets in paced batches and merge them
//!
//! Any transport error fails the whole search; no partial result is
//! returned. Dropping the search future cancels the in-flight batch.

mod orchestrator;
mod plan;
mod types;

pub use orchestrator::SearchOrchestrator;
pub use plan::PagePlan;
pub use types::SearchStats;

#[cfg(test)]
mod tests;
