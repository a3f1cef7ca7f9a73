//! HTTP transport module
//!
//! Provides the transport the search core fetches pages through.
//!
//! # Features
//!
//! - **Transport trait**: `get(target) -> document`, shared across concurrent fetches
//! - **Pass-through headers**: auth token and client identity set once at construction
//! - **Per-request timeout**: every request is bounded
//! - **Rate Limiting**: optional token bucket rate limiter using governor
//!
//! The transport never retries. Throttle handling lives in the retry policy.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, Transport};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
