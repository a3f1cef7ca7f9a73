//! Query types
//!
//! A `SearchQuery` is built by the caller and stays read-only for the
//! duration of a search.

use crate::batch::{BatchConfig, Pacing};
use crate::error::{Error, Result};
use crate::types::{HasFilter, Snowflake, Target};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pagination controls for a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Concurrent page fetches per batch
    #[serde(default = "default_rate")]
    pub rate: usize,
    /// Delay between consecutive batches
    #[serde(default = "default_sleep", with = "duration_secs")]
    pub sleep: Duration,
    /// Maximum number of results to retrieve (defaults to `total_results`)
    #[serde(default)]
    pub limit: Option<u64>,
    /// Whether to retrieve message bodies at all
    #[serde(default = "default_true")]
    pub messages: bool,
    /// How the inter-batch delay reacts to throttle signals
    #[serde(default)]
    pub pacing: Pacing,
}

fn default_rate() -> usize {
    5
}

fn default_sleep() -> Duration {
    Duration::from_secs(3)
}

fn default_true() -> bool {
    true
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            sleep: default_sleep(),
            limit: None,
            messages: true,
            pacing: Pacing::Fixed,
        }
    }
}

impl SearchOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the batch size
    #[must_use]
    pub fn with_rate(mut self, rate: usize) -> Self {
        self.rate = rate;
        self
    }

    /// Set the inter-batch delay
    #[must_use]
    pub fn with_sleep(mut self, sleep: Duration) -> Self {
        self.sleep = sleep;
        self
    }

    /// Set the result limit
    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Enable or disable message retrieval
    #[must_use]
    pub fn with_messages(mut self, messages: bool) -> Self {
        self.messages = messages;
        self
    }

    /// Set the pacing mode
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Check the options before any request is issued
    pub fn validate(&self) -> Result<()> {
        if self.rate == 0 {
            return Err(Error::validation("rate must be at least 1"));
        }
        Ok(())
    }

    /// Scheduler configuration derived from these options
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            rate: self.rate,
            sleep: self.sleep,
            pacing: self.pacing,
        }
    }
}

/// Structured search parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Channel or guild to search in
    pub target: Target,
    /// Additional channel filters (`channel_id`)
    #[serde(default)]
    pub channels: Vec<Snowflake>,
    /// Free-text content
    #[serde(default)]
    pub content: Option<String>,
    /// Author filters (`author_id`)
    #[serde(default)]
    pub authors: Vec<Snowflake>,
    /// Whether NSFW channels are included
    #[serde(default)]
    pub include_nsfw: Option<bool>,
    /// Mentioned-user filters
    #[serde(default)]
    pub mentions: Vec<Snowflake>,
    /// Lower id bound (exclusive)
    #[serde(default)]
    pub min_id: Option<Snowflake>,
    /// Upper id bound (exclusive)
    #[serde(default)]
    pub max_id: Option<Snowflake>,
    /// Attachment-type filters
    #[serde(default)]
    pub has: Vec<HasFilter>,
    /// Pagination controls
    #[serde(default)]
    pub options: SearchOptions,
}

impl SearchQuery {
    /// Create a query for the given target
    pub fn new(target: Target) -> Self {
        Self {
            target,
            channels: Vec::new(),
            content: None,
            authors: Vec::new(),
            include_nsfw: None,
            mentions: Vec::new(),
            min_id: None,
            max_id: None,
            has: Vec::new(),
            options: SearchOptions::default(),
        }
    }

    /// Search a single channel
    pub fn channel(id: impl Into<Snowflake>) -> Self {
        Self::new(Target::Channel(id.into()))
    }

    /// Search a whole guild
    pub fn guild(id: impl Into<Snowflake>) -> Self {
        Self::new(Target::Guild(id.into()))
    }

    /// Restrict to a channel (repeatable)
    #[must_use]
    pub fn in_channel(mut self, id: impl Into<Snowflake>) -> Self {
        self.channels.push(id.into());
        self
    }

    /// Set the content filter
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Add an author filter (repeatable)
    #[must_use]
    pub fn author(mut self, id: impl Into<Snowflake>) -> Self {
        self.authors.push(id.into());
        self
    }

    /// Include or exclude NSFW channels
    #[must_use]
    pub fn nsfw(mut self, include: bool) -> Self {
        self.include_nsfw = Some(include);
        self
    }

    /// Add a mention filter (repeatable)
    #[must_use]
    pub fn mentions(mut self, id: impl Into<Snowflake>) -> Self {
        self.mentions.push(id.into());
        self
    }

    /// Only return messages newer than this id
    #[must_use]
    pub fn min_id(mut self, id: impl Into<Snowflake>) -> Self {
        self.min_id = Some(id.into());
        self
    }

    /// Only return messages older than this id
    #[must_use]
    pub fn max_id(mut self, id: impl Into<Snowflake>) -> Self {
        self.max_id = Some(id.into());
        self
    }

    /// Add an attachment-type filter (repeatable)
    #[must_use]
    pub fn has(mut self, filter: HasFilter) -> Self {
        self.has.push(filter);
        self
    }

    /// Replace the pagination options
    #[must_use]
    pub fn options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the result limit
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.options.limit = Some(limit);
        self
    }

    /// Enable or disable message retrieval
    #[must_use]
    pub fn messages(mut self, messages: bool) -> Self {
        self.options.messages = messages;
        self
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(serde::de::Error::custom("sleep must be a non-negative number of seconds"));
        }
        Ok(Duration::from_secs_f64(secs))
    }
}
