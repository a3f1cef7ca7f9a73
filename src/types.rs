//! Common types used throughout channel-search
//!
//! Shared type aliases, ids and search target definitions.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Number of records the search API returns per page
pub const PAGE_SIZE: u64 = 25;

// ============================================================================
// Snowflake
// ============================================================================

/// First millisecond of 2015, the epoch snowflake timestamps count from
pub const SNOWFLAKE_EPOCH_MS: i64 = 1_420_070_400_000;

/// A 64-bit entity id (channel, guild, user, message)
///
/// The upper 42 bits hold milliseconds since [`SNOWFLAKE_EPOCH_MS`], which
/// lets `min_id` / `max_id` bounds be derived from timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snowflake(pub u64);

impl Snowflake {
    /// Smallest snowflake that could have been created at `time`
    ///
    /// Times before the epoch map to zero.
    pub fn from_datetime(time: DateTime<Utc>) -> Self {
        let ms = time.timestamp_millis() - SNOWFLAKE_EPOCH_MS;
        if ms <= 0 {
            return Self(0);
        }
        Self((ms as u64) << 22)
    }

    /// Creation time encoded in this snowflake
    pub fn timestamp(self) -> DateTime<Utc> {
        let ms = (self.0 >> 22) as i64 + SNOWFLAKE_EPOCH_MS;
        Utc.timestamp_millis_opt(ms)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Raw id value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Search Target
// ============================================================================

/// Scope a search runs in
///
/// Exactly one of channel or guild is targeted; the enum makes the
/// other combinations unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Target {
    /// Search a single channel
    Channel(Snowflake),
    /// Search every channel of a guild
    Guild(Snowflake),
}

impl Target {
    /// Path segment of the search endpoint for this target
    pub fn search_path(&self) -> String {
        match self {
            Target::Channel(id) => format!("channels/{id}/messages/search"),
            Target::Guild(id) => format!("guilds/{id}/messages/search"),
        }
    }

    /// Id of the targeted channel or guild
    pub fn id(&self) -> Snowflake {
        match self {
            Target::Channel(id) | Target::Guild(id) => *id,
        }
    }
}

// ============================================================================
// Attachment Filter
// ============================================================================

/// Attachment-type filter (`has=` query parameter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HasFilter {
    Link,
    Embed,
    File,
    Video,
    Image,
    Sound,
}

impl HasFilter {
    /// Value sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HasFilter::Link => "link",
            HasFilter::Embed => "embed",
            HasFilter::File => "file",
            HasFilter::Video => "video",
            HasFilter::Image => "image",
            HasFilter::Sound => "sound",
        }
    }
}

impl fmt::Display for HasFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
