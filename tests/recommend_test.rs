mod server;

use seopulse::http_client::build_http_client;
use seopulse::models::{IssueRecord, Severity};
use seopulse::recommend::{fallback_recommendations, Recommender};
use server::start_completions_server;

#[tokio::test]
async fn test_fenced_completion_response_parses() {
    let url = start_completions_server().await;
    let client = build_http_client(10).expect("Failed to build HTTP client");
    let recommender = Recommender::new(client, "test-key".to_string()).with_completions_url(url);

    let issues = vec![IssueRecord {
        issue_id: 101,
        issue_name: "Title element is too short".to_string(),
        severity: Severity::Warning,
        count: 4,
        delta: 0,
    }];

    let recs = recommender
        .recommendations("example.com", None, None, &issues, None)
        .await;

    // The mock wraps its JSON in ```json fences; parsing must still succeed
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].category, "Titles");
    assert_eq!(recs[1].severity, "medium");
}

#[tokio::test]
async fn test_unreachable_completions_falls_back() {
    let client = build_http_client(2).expect("Failed to build HTTP client");
    let recommender = Recommender::new(client, "test-key".to_string())
        .with_completions_url("http://127.0.0.1:9/v1/chat/completions");

    let recs = recommender
        .recommendations("example.com", None, None, &[], None)
        .await;

    let fallback = fallback_recommendations();
    assert_eq!(recs.len(), fallback.len());
    assert_eq!(recs[0].category, fallback[0].category);
}

#[test]
fn test_fallback_has_ten_entries() {
    let recs = fallback_recommendations();
    assert_eq!(recs.len(), 10);
    assert!(recs.iter().all(|r| !r.fix.is_empty()));
}
