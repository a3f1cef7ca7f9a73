//! Hit extraction

use crate::types::JsonValue;

/// Lazily yield the hit records of a page document
///
/// Missing or mistyped fields are skipped rather than reported: a document
/// without `messages`, a group that is not a sequence, or a candidate that
/// is not an object all contribute nothing.
pub fn hits(document: &JsonValue) -> impl Iterator<Item = &JsonValue> {
    document
        .get("messages")
        .and_then(JsonValue::as_array)
        .into_iter()
        .flatten()
        .filter_map(JsonValue::as_array)
        .flatten()
        .filter(|candidate| is_hit(candidate))
}

fn is_hit(candidate: &JsonValue) -> bool {
    candidate.get("hit").is_some_and(|marker| !marker.is_null())
}
