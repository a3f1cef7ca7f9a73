//! In-memory transport for unit tests
//!
//! Routes requests by their `offset` query parameter (absent = 0). Each
//! offset has a queue of scripted responses; the last one repeats.

use crate::error::{Error, Result};
use crate::http::Transport;
use crate::types::JsonValue;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub(crate) enum MockResponse {
    Json(JsonValue),
    Status(u16),
}

#[derive(Default)]
pub(crate) struct MockTransport {
    routes: Mutex<HashMap<u64, VecDeque<MockResponse>>>,
    calls: Mutex<Vec<u64>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    latency: Duration,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub(crate) fn on_offset(self, offset: u64, document: JsonValue) -> Self {
        self.push(offset, MockResponse::Json(document));
        self
    }

    pub(crate) fn fail_offset(self, offset: u64, status: u16) -> Self {
        self.push(offset, MockResponse::Status(status));
        self
    }

    fn push(&self, offset: u64, response: MockResponse) {
        self.routes
            .lock()
            .unwrap()
            .entry(offset)
            .or_default()
            .push_back(response);
    }

    /// Offsets requested, in request order
    pub(crate) fn calls(&self) -> Vec<u64> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self, offset: u64) -> usize {
        self.calls().iter().filter(|o| **o == offset).count()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_response(&self, offset: u64) -> Option<MockResponse> {
        let mut routes = self.routes.lock().unwrap();
        let queue = routes.get_mut(&offset)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

pub(crate) fn offset_of(target: &str) -> u64 {
    Url::parse(target)
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "offset")
                .and_then(|(_, value)| value.parse().ok())
        })
        .unwrap_or(0)
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, target: &str) -> Result<JsonValue> {
        let offset = offset_of(target);
        self.calls.lock().unwrap().push(offset);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.next_response(offset) {
            Some(MockResponse::Json(document)) => Ok(document),
            Some(MockResponse::Status(status)) => {
                Err(Error::http_status(status, "scripted failure"))
            }
            None => Err(Error::http_status(404, format!("no route for offset {offset}"))),
        }
    }
}

/// A page document holding one hit per id
pub(crate) fn page_with_hits(total_results: u64, ids: &[&str]) -> JsonValue {
    let groups: Vec<JsonValue> = ids
        .iter()
        .map(|id| {
            serde_json::json!([
                {"id": format!("{id}-context"), "content": "context"},
                {"id": id, "content": "match", "hit": true}
            ])
        })
        .collect();

    serde_json::json!({
        "total_results": total_results,
        "analytics_id": "analytics-1",
        "messages": groups
    })
}
