//! Tests for search orchestration module

use super::*;
use crate::batch::Pacing;
use crate::error::Error;
use crate::query::{SearchOptions, SearchQuery, UrlBuilder};
use crate::retry::RetryPolicy;
use crate::test_support::{page_with_hits, MockTransport};
use serde_json::json;
use std::time::Duration;
use test_case::test_case;
use tokio::time::Instant;

fn orchestrator(transport: MockTransport) -> SearchOrchestrator<MockTransport> {
    SearchOrchestrator::new(transport, UrlBuilder::new("https://api.test/v6").unwrap())
}

fn fast_query() -> SearchQuery {
    SearchQuery::channel(123u64)
        .content("hello")
        .options(SearchOptions::new().with_sleep(Duration::from_millis(10)))
}

/// Transport serving `total` results, one hit per page named after its offset
fn serving(total: u64) -> MockTransport {
    let mut transport = MockTransport::new();
    let pages = total.div_ceil(25).max(1);
    for page in 0..pages {
        let offset = page * 25;
        let id = format!("p{offset}");
        transport = transport.on_offset(offset, page_with_hits(total, &[id.as_str()]));
    }
    transport
}

fn hit_ids(result: &crate::aggregate::SearchResult) -> Vec<String> {
    result
        .iter()
        .filter_map(|record| record.id().map(str::to_string))
        .collect()
}

// ============================================================================
// PagePlan Tests
// ============================================================================

#[test_case(0, None, 0, &[] ; "no results")]
#[test_case(25, None, 1, &[] ; "exactly one page")]
#[test_case(30, None, 2, &[25] ; "thirty results")]
#[test_case(52, None, 3, &[25, 50] ; "fifty two results")]
#[test_case(100, Some(30), 2, &[25] ; "limit bounds pages")]
#[test_case(100, Some(25), 1, &[] ; "limit of one page")]
#[test_case(100, Some(0), 0, &[] ; "zero limit")]
#[test_case(100, Some(100), 4, &[25, 50, 75] ; "limit equals total")]
fn test_page_plan(total: u64, limit: Option<u64>, pages: u64, offsets: &[u64]) {
    let plan = PagePlan::new(total, limit).unwrap();
    assert_eq!(plan.pages, pages);
    assert_eq!(plan.offsets, offsets);
    assert_eq!(plan.needs_paging(), !offsets.is_empty());
}

#[test_case(0, 1 ; "zero total")]
#[test_case(1, 2 ; "one result")]
#[test_case(52, 53 ; "just over")]
#[test_case(52, 1000 ; "far over")]
fn test_page_plan_limit_above_total(total: u64, limit: u64) {
    let err = PagePlan::new(total, Some(limit)).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_search_stats_add_page() {
    let mut stats = SearchStats::new();
    stats.add_page(1, false);
    stats.add_page(2, true);
    assert_eq!(stats.pages_fetched, 2);
    assert_eq!(stats.requests, 3);
    assert_eq!(stats.throttled_pages, 1);
}

// ============================================================================
// Orchestration Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_channel_scenario_fetches_three_pages() {
    let search = orchestrator(serving(52));

    let result = search.search(&fast_query()).await.unwrap();

    assert_eq!(result.total_results, 52);
    assert_eq!(result.analytics_id.as_deref(), Some("analytics-1"));
    assert_eq!(hit_ids(&result), vec!["p0", "p25", "p50"]);

    let mut calls = search.transport().calls();
    calls.sort_unstable();
    assert_eq!(calls, vec![0, 25, 50]);
}

#[tokio::test(start_paused = true)]
async fn test_summary_preserved_regardless_of_hits() {
    // Pages beyond the probe carry no hits at all
    let transport = MockTransport::new()
        .on_offset(0, json!({"total_results": 52, "messages": []}))
        .on_offset(25, json!({"total_results": 52}))
        .on_offset(50, json!({"total_results": 52, "messages": [[{"id": "x"}]]}));
    let search = orchestrator(transport);

    let result = search.search(&fast_query()).await.unwrap();

    assert_eq!(result.total_results, 52);
    assert!(result.is_empty());
    assert_eq!(search.transport().calls().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_messages_disabled_only_probes() {
    let search = orchestrator(serving(300));

    let result = search
        .search(&fast_query().messages(false))
        .await
        .unwrap();

    assert_eq!(result.total_results, 300);
    assert!(result.is_empty());
    assert_eq!(search.transport().calls(), vec![0]);
}

#[tokio::test(start_paused = true)]
async fn test_messages_disabled_skips_limit_validation() {
    let search = orchestrator(serving(10));

    let result = search
        .search(&fast_query().messages(false).limit(500))
        .await
        .unwrap();

    assert_eq!(result.total_results, 10);
}

#[tokio::test(start_paused = true)]
async fn test_zero_results_single_fetch() {
    let transport = MockTransport::new().on_offset(0, json!({"total_results": 0, "messages": []}));
    let search = orchestrator(transport);

    let result = search.search(&fast_query()).await.unwrap();

    assert_eq!(result.total_results, 0);
    assert!(result.is_empty());
    assert_eq!(search.transport().calls(), vec![0]);
}

#[tokio::test(start_paused = true)]
async fn test_thirty_results_fetch_one_more_page() {
    let search = orchestrator(serving(30));

    let result = search.search(&fast_query()).await.unwrap();

    assert_eq!(search.transport().calls(), vec![0, 25]);
    assert_eq!(hit_ids(&result), vec!["p0", "p25"]);
}

#[tokio::test(start_paused = true)]
async fn test_limit_above_total_is_validation_error() {
    let search = orchestrator(serving(30));

    let err = search.search(&fast_query().limit(31)).await.unwrap_err();

    assert!(err.is_validation());
    // Rejected before any paging began
    assert_eq!(search.transport().calls(), vec![0]);
}

#[tokio::test(start_paused = true)]
async fn test_small_limit_keeps_full_first_page() {
    let transport = MockTransport::new()
        .on_offset(0, page_with_hits(200, &["a", "b", "c"]));
    let search = orchestrator(transport);

    let result = search.search(&fast_query().limit(2)).await.unwrap();

    assert_eq!(hit_ids(&result), vec!["a", "b", "c"]);
    assert_eq!(search.transport().calls(), vec![0]);
}

#[tokio::test(start_paused = true)]
async fn test_limit_bounds_pages_fetched() {
    let search = orchestrator(serving(500));

    let result = search.search(&fast_query().limit(60)).await.unwrap();

    assert_eq!(result.total_results, 500);
    assert_eq!(hit_ids(&result), vec!["p0", "p25", "p50"]);
    assert_eq!(search.transport().calls().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_missing_total_results_is_parse_error() {
    let transport = MockTransport::new().on_offset(0, json!({"messages": []}));
    let search = orchestrator(transport);

    let err = search.search(&fast_query()).await.unwrap_err();

    assert!(matches!(err, Error::Parse { .. }));
    assert_eq!(search.transport().calls(), vec![0]);
}

#[tokio::test(start_paused = true)]
async fn test_zero_rate_rejected_before_any_request() {
    let search = orchestrator(serving(30));
    let query = fast_query().options(SearchOptions::new().with_rate(0));

    let err = search.search(&query).await.unwrap_err();

    assert!(err.is_validation());
    assert!(search.transport().calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_batches_are_paced() {
    // 13 pages: the probe plus 12 remaining offsets
    let search = orchestrator(serving(325));
    let query = SearchQuery::guild(1u64).options(
        SearchOptions::new()
            .with_rate(5)
            .with_sleep(Duration::from_secs(3)),
    );

    let start = Instant::now();
    let (result, stats) = search.search_with_stats(&query).await.unwrap();

    assert_eq!(stats.batches, 3);
    assert_eq!(stats.batch_sizes, vec![5, 5, 2]);
    assert_eq!(stats.paused, Duration::from_secs(6));
    assert_eq!(stats.pages_fetched, 13);
    assert_eq!(result.len(), 13);
    // One pause between each consecutive pair of batches
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(6), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_secs(9), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_requests_bounded_by_rate() {
    let transport = serving(250).with_latency(Duration::from_millis(200));
    let search = orchestrator(transport);
    let query = fast_query().options(
        SearchOptions::new()
            .with_rate(3)
            .with_sleep(Duration::from_millis(10)),
    );

    search.search(&query).await.unwrap();

    assert_eq!(search.transport().max_in_flight(), 3);
    assert_eq!(search.transport().calls().len(), 10);
}

#[tokio::test(start_paused = true)]
async fn test_batch_order_is_preserved() {
    let search = orchestrator(serving(130));
    let query = fast_query().options(
        SearchOptions::new()
            .with_rate(2)
            .with_sleep(Duration::from_millis(10)),
    );

    let result = search.search(&query).await.unwrap();

    assert_eq!(
        hit_ids(&result),
        vec!["p0", "p25", "p50", "p75", "p100", "p125"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_null_retry_after_keeps_hits() {
    let with_null_retry = |id: &str| {
        let mut page = page_with_hits(30, &[id]);
        page["retry_after"] = serde_json::Value::Null;
        page
    };
    let transport = MockTransport::new()
        .on_offset(0, with_null_retry("p0"))
        .on_offset(25, with_null_retry("p25"));
    let search = orchestrator(transport);

    let (result, stats) = search.search_with_stats(&fast_query()).await.unwrap();

    assert_eq!(hit_ids(&result), vec!["p0", "p25"]);
    assert_eq!(search.transport().calls(), vec![0, 25]);
    assert_eq!(stats.throttled_pages, 0);
}

#[tokio::test(start_paused = true)]
async fn test_always_throttled_page_fetched_twice() {
    let transport = MockTransport::new()
        .on_offset(0, page_with_hits(30, &["first"]))
        .on_offset(25, json!({"retry_after": 500}));
    let search = orchestrator(transport);

    let (result, stats) = search.search_with_stats(&fast_query()).await.unwrap();

    assert_eq!(search.transport().call_count(25), 2);
    assert_eq!(hit_ids(&result), vec!["first"]);
    assert_eq!(stats.requests, 3);
    assert_eq!(stats.throttled_pages, 1);
}

#[tokio::test(start_paused = true)]
async fn test_throttled_page_recovers_on_retry() {
    let transport = MockTransport::new()
        .on_offset(0, page_with_hits(30, &["first"]))
        .on_offset(25, json!({"retry_after": 500}))
        .on_offset(25, page_with_hits(30, &["second"]));
    let search = orchestrator(transport);

    let result = search.search(&fast_query()).await.unwrap();

    assert_eq!(hit_ids(&result), vec!["first", "second"]);
}

#[tokio::test(start_paused = true)]
async fn test_throttled_probe_is_retried() {
    let transport = MockTransport::new()
        .on_offset(0, json!({"retry_after": 250}))
        .on_offset(0, page_with_hits(3, &["a"]));
    let search = orchestrator(transport);

    let result = search.search(&fast_query()).await.unwrap();

    assert_eq!(result.total_results, 3);
    assert_eq!(search.transport().call_count(0), 2);
}

#[tokio::test(start_paused = true)]
async fn test_page_failure_fails_whole_search() {
    let transport = MockTransport::new()
        .on_offset(0, page_with_hits(200, &["p0"]))
        .on_offset(25, page_with_hits(200, &["p25"]))
        .on_offset(50, page_with_hits(200, &["p50"]))
        .on_offset(75, page_with_hits(200, &["p75"]))
        .fail_offset(100, 500)
        .on_offset(125, page_with_hits(200, &["p125"]))
        .on_offset(150, page_with_hits(200, &["p150"]))
        .on_offset(175, page_with_hits(200, &["p175"]));
    let search = orchestrator(transport);
    let query = fast_query().options(
        SearchOptions::new()
            .with_rate(2)
            .with_sleep(Duration::from_millis(10)),
    );

    let err = search.search(&query).await.unwrap_err();

    assert!(err.is_transport());
    // Batches [25, 50], [75, 100]; the batch after the failure never starts
    let calls = search.transport().calls();
    assert!(!calls.contains(&125));
    assert!(!calls.contains(&150));
}

#[tokio::test(start_paused = true)]
async fn test_adaptive_pacing_follows_throttle_signal() {
    let transport = MockTransport::new()
        .on_offset(0, page_with_hits(75, &["p0"]))
        .on_offset(25, json!({"retry_after": 8000}))
        .on_offset(25, page_with_hits(75, &["p25"]))
        .on_offset(50, page_with_hits(75, &["p50"]));
    let search = orchestrator(transport);
    let query = fast_query().options(
        SearchOptions::new()
            .with_rate(1)
            .with_sleep(Duration::from_secs(1))
            .with_pacing(Pacing::Adaptive),
    );

    let start = Instant::now();
    let result = search.search(&query).await.unwrap();

    assert_eq!(result.len(), 3);
    // 8s retry wait, then an 8s pause instead of the 1s default
    assert!(start.elapsed() >= Duration::from_secs(16));
}

#[tokio::test(start_paused = true)]
async fn test_retry_policy_override() {
    let transport = MockTransport::new()
        .on_offset(0, page_with_hits(30, &["first"]))
        .on_offset(25, json!({"retry_after": 100}));
    let search = orchestrator(transport).with_retry_policy(RetryPolicy::new().with_max_retries(3));

    search.search(&fast_query()).await.unwrap();

    assert_eq!(search.transport().call_count(25), 4);
}
