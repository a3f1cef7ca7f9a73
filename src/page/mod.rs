//! Page module
//!
//! Classification of fetched page documents and extraction of hit records.
//!
//! # Overview
//!
//! A page document is classified once into a [`Page`] and then
//! pattern-matched, instead of probing fields speculatively:
//! - `Page::Results` - carries a `messages` sequence
//! - `Page::Empty` - no `messages` key, zero hits
//! - `Page::Throttled` - carries a `retry_after` delay
//! - `Page::Malformed` - not a usable document, zero hits
//!
//! [`hits`] is the pure filter: message groups are flattened and only
//! candidates carrying a non-null `hit` marker are yielded, in page order.

mod filter;
mod types;

pub use filter::hits;
pub use types::{HitRecord, Page, PageSummary};
