// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]

//! # channel-search
//!
//! Rate-limited, concurrent paginator for a message search API.
//!
//! Given one query it probes the first page to learn the total result
//! count, fetches the remaining pages in paced concurrent batches, keeps
//! only the records marked as hits, and returns them as one result.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use channel_search::{ClientConfig, SearchOrchestrator, SearchQuery, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::from_file("channel-search.yaml")?.apply_env();
//!     let search = SearchOrchestrator::from_config(&config)?;
//!
//!     let query = SearchQuery::channel(123u64).content("hello").limit(100);
//!     let result = search.search(&query).await?;
//!
//!     println!("{} of {} results", result.len(), result.total_results);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      SearchOrchestrator                        │
//! │   probe → validate limit → plan pages → batches → result       │
//! └────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌────────────┬─────────────┬───┴──────────┬────────────┬─────────┐
//! │   Query    │    HTTP     │    Batch     │   Retry    │  Page   │
//! ├────────────┼─────────────┼──────────────┼────────────┼─────────┤
//! │ Filters    │ Transport   │ Fixed groups │ retry_after│ Classify│
//! │ URL build  │ Headers     │ Pacing       │ One retry  │ Hits    │
//! │ Options    │ Timeout     │ Fan-in merge │            │ Summary │
//! └────────────┴─────────────┴──────────────┴────────────┴─────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// Search query and URL builder
pub mod query;

/// HTTP transport with rate limiting
pub mod http;

/// Page classification and hit extraction
pub mod page;

/// Throttle retry policy
pub mod retry;

/// Batch scheduling
pub mod batch;

/// Result aggregation
pub mod aggregate;

/// End-to-end search orchestration
pub mod search;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use aggregate::SearchResult;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use page::HitRecord;
pub use query::{SearchOptions, SearchQuery};
pub use search::{SearchOrchestrator, SearchStats};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
