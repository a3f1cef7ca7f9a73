//! Page types
//!
//! `Page` is transient: created by a fetch, filtered, then discarded.

use super::filter::hits;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// One fetched page document, classified by shape
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    /// Document with a `messages` sequence
    Results(JsonValue),
    /// Document without `messages`
    Empty(JsonValue),
    /// Throttle signal with the server-suggested delay
    Throttled {
        /// Delay requested by the server
        retry_after: Duration,
        /// The full document (may still carry `messages`)
        document: JsonValue,
    },
    /// Unusable document
    Malformed {
        /// Why the document was rejected
        reason: String,
        /// The rejected document
        document: JsonValue,
    },
}

impl Page {
    /// Classify a document
    ///
    /// A null `retry_after` counts as absent; a non-numeric one is ignored
    /// and the page is classified by its `messages`.
    pub fn classify(document: JsonValue) -> Self {
        let Some(object) = document.as_object() else {
            return Self::Malformed {
                reason: format!("expected an object, got {}", type_name(&document)),
                document,
            };
        };

        match object.get("retry_after") {
            None | Some(JsonValue::Null) => {}
            Some(value) => match retry_after_delay(value) {
                Some(retry_after) => {
                    return Self::Throttled {
                        retry_after,
                        document,
                    }
                }
                None => warn!("Ignoring non-numeric retry_after: {}", value),
            },
        }

        let has_messages = match object.get("messages") {
            None | Some(JsonValue::Null) => Ok(false),
            Some(JsonValue::Array(_)) => Ok(true),
            Some(other) => Err(format!("messages is {}, expected an array", type_name(other))),
        };

        match has_messages {
            Ok(true) => Self::Results(document),
            Ok(false) => Self::Empty(document),
            Err(reason) => Self::Malformed { reason, document },
        }
    }

    /// Server-suggested delay, if this page is a throttle signal
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Throttled { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// Check if this page is a throttle signal
    pub fn is_throttled(&self) -> bool {
        matches!(self, Self::Throttled { .. })
    }

    /// The raw document
    pub fn document(&self) -> &JsonValue {
        match self {
            Self::Results(document)
            | Self::Empty(document)
            | Self::Throttled { document, .. }
            | Self::Malformed { document, .. } => document,
        }
    }

    /// Hit records of this page, in page order
    ///
    /// Malformed pages yield nothing.
    pub fn hits(&self) -> impl Iterator<Item = &JsonValue> {
        let source = match self {
            Self::Results(document) | Self::Throttled { document, .. } => Some(document),
            Self::Empty(_) | Self::Malformed { .. } => None,
        };
        source.into_iter().flat_map(hits)
    }

    /// Consume the page into owned hit records
    pub fn into_hits(self) -> Vec<HitRecord> {
        self.hits().cloned().map(HitRecord).collect()
    }
}

/// Delay from a `retry_after` value in milliseconds; negative values clamp to zero
fn retry_after_delay(value: &JsonValue) -> Option<Duration> {
    let ms = value.as_f64()?;
    Duration::try_from_secs_f64(ms.max(0.0) / 1000.0).ok()
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// One message-like record marked as a search hit
///
/// The payload is passed through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HitRecord(pub JsonValue);

impl HitRecord {
    /// Borrow the raw payload
    pub fn as_value(&self) -> &JsonValue {
        &self.0
    }

    /// Take the raw payload
    pub fn into_inner(self) -> JsonValue {
        self.0
    }

    /// Message id, when present as a string
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(JsonValue::as_str)
    }
}

impl From<JsonValue> for HitRecord {
    fn from(value: JsonValue) -> Self {
        Self(value)
    }
}

/// Summary fields read from the probe response
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageSummary {
    /// Analytics identifier, if the server sent one
    pub analytics_id: Option<String>,
    /// Total number of results matching the query
    pub total_results: u64,
}

impl PageSummary {
    /// Read the summary from a probe document
    ///
    /// `total_results` must be present and numeric (a JSON number or a
    /// numeric string); `analytics_id` is optional.
    pub fn from_document(document: &JsonValue) -> Result<Self> {
        let raw = document
            .get("total_results")
            .ok_or_else(|| Error::parse("total_results", "field is missing"))?;

        let total_results = parse_count(raw).ok_or_else(|| {
            Error::parse("total_results", format!("not a non-negative integer: {raw}"))
        })?;

        let analytics_id = document
            .get("analytics_id")
            .and_then(JsonValue::as_str)
            .map(str::to_string);

        Ok(Self {
            analytics_id,
            total_results,
        })
    }
}

fn parse_count(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
