//! Query module
//!
//! Structured search parameters and the URL builder that turns them into
//! a request target.
//!
//! # Overview
//!
//! - `SearchQuery` - target scope, filters and pagination options
//! - `SearchOptions` - batch rate, inter-batch delay, result limit
//! - `UrlBuilder` - maps a query to the search endpoint URL

mod builder;
mod types;

pub use builder::{query_pairs, UrlBuilder, DEFAULT_API_BASE};
pub use types::{SearchOptions, SearchQuery};
