//! Batch scheduling module
//!
//! Issues page fetches in fixed-size concurrent groups with a pause between
//! groups, a client-side defence against server rate limits.
//!
//! # Overview
//!
//! - Groups execute strictly sequentially
//! - Tasks within a group run concurrently, no ordering among them
//! - A group's outputs are handed to the sink only after every task in it
//!   has completed (fan-out / fan-in), so the sink is the single writer
//! - With `rate` tasks per group and `sleep` between groups the request
//!   rate stays near `rate` per `sleep` window

mod scheduler;
mod types;

pub use scheduler::BatchScheduler;
pub use types::{BatchConfig, Pacing, ScheduleStats, Throttled};
