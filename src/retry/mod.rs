//! Retry module
//!
//! Bounded handling of the server's soft rate-limit signal.
//!
//! # Overview
//!
//! The search API answers throttled requests with a document carrying
//! `retry_after` (milliseconds) instead of failing. `RetryPolicy` waits that
//! long and reissues the fetch, at most `max_retries` times (one by
//! default). The last response obtained is final even if it is still a
//! throttle signal. Transport errors are never retried here.

mod policy;

pub use policy::{FetchOutcome, RetryPolicy};
