//! Integration tests for the quota-gated generation endpoints.

mod helpers;

use std::sync::Arc;

use doodlehub_generate::StaticImageGenerator;
use http::StatusCode;

#[tokio::test]
async fn test_guest_can_generate_within_limit() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/generate/coloring",
            Some(serde_json::json!({"prompt": "a friendly dinosaur"})),
            Some("203.0.113.1"),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(response.body["imageUrl"].as_str().unwrap().starts_with("https://"));
    assert_eq!(response.body["originalPrompt"], "a friendly dinosaur");
    assert_eq!(response.body["guestRemaining"], 2);
}

#[tokio::test]
async fn test_guest_remaining_counts_down_then_denies() {
    let app = helpers::TestApp::new();
    let key = Some("203.0.113.2");
    let body = serde_json::json!({"prompt": "a cat"});

    for expected_remaining in [2, 1, 0] {
        let response = app
            .request("POST", "/api/generate/coloring", Some(body.clone()), key)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["guestRemaining"], expected_remaining);
    }

    let denied = app
        .request("POST", "/api/generate/coloring", Some(body.clone()), key)
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.body["error"], "guest_limit_reached");

    // Denial is idempotent: repeating yields the same rejection.
    let denied_again = app
        .request("POST", "/api/generate/coloring", Some(body), key)
        .await;
    assert_eq!(denied_again.status, StatusCode::FORBIDDEN);
    assert_eq!(denied_again.body["error"], "guest_limit_reached");
}

#[tokio::test]
async fn test_guest_counters_are_keyed_per_caller() {
    let app = helpers::TestApp::new();
    let body = serde_json::json!({"prompt": "a boat"});

    for _ in 0..3 {
        app.request(
            "POST",
            "/api/generate/coloring",
            Some(body.clone()),
            Some("203.0.113.3"),
        )
        .await;
    }

    // A different caller key still has its full allowance.
    let other = app
        .request(
            "POST",
            "/api/generate/coloring",
            Some(body),
            Some("203.0.113.4"),
        )
        .await;
    assert_eq!(other.status, StatusCode::OK);
    assert_eq!(other.body["guestRemaining"], 2);
}

#[tokio::test]
async fn test_missing_prompt_is_rejected_without_side_effects() {
    let app = helpers::TestApp::new();
    let key = Some("203.0.113.5");

    let response = app
        .request(
            "POST",
            "/api/generate/coloring",
            Some(serde_json::json!({"prompt": "   "})),
            key,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Prompt is required");
    assert_eq!(app.generator.call_count(), 0);

    // The rejected request consumed no quota.
    let ok = app
        .request(
            "POST",
            "/api/generate/coloring",
            Some(serde_json::json!({"prompt": "a kite"})),
            key,
        )
        .await;
    assert_eq!(ok.body["guestRemaining"], 2);
}

#[tokio::test]
async fn test_upstream_failure_does_not_consume_quota() {
    let app = helpers::TestApp::with_generator(Arc::new(StaticImageGenerator::failing()));
    let key = Some("203.0.113.6");
    let body = serde_json::json!({"prompt": "a rocket"});

    let failed = app
        .request("POST", "/api/generate/coloring", Some(body.clone()), key)
        .await;
    assert_eq!(failed.status, StatusCode::INTERNAL_SERVER_ERROR);

    // Generation recovers; the failed attempt was never charged, so the
    // full guest allowance is still available.
    app.generator.set_failing(false);
    for expected_remaining in [2, 1, 0] {
        let response = app
            .request("POST", "/api/generate/coloring", Some(body.clone()), key)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["guestRemaining"], expected_remaining);
    }
}

#[tokio::test]
async fn test_tracing_endpoint_returns_trace_spec() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/generate/tracing",
            Some(serde_json::json!({"prompt": "trace the letter b in lowercase"})),
            Some("203.0.113.7"),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let trace = &response.body["trace"];
    assert_eq!(trace["type"], "letter");
    assert_eq!(trace["content"], "b");
    assert_eq!(trace["style"], "lowercase");
    assert!(response.body["prompt"].as_str().unwrap().contains("lowercase letter b"));
}

#[tokio::test]
async fn test_tracing_falls_back_on_unclassifiable_prompt() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/generate/tracing",
            Some(serde_json::json!({"prompt": "xyz123"})),
            Some("203.0.113.8"),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["trace"]["type"], "letter");
    assert_eq!(response.body["trace"]["content"], "A");
    assert_eq!(response.body["trace"]["style"], "uppercase");
}

#[tokio::test]
async fn test_coloring_and_tracing_share_one_guest_counter() {
    let app = helpers::TestApp::new();
    let key = Some("203.0.113.9");

    app.request(
        "POST",
        "/api/generate/coloring",
        Some(serde_json::json!({"prompt": "a dog"})),
        key,
    )
    .await;
    app.request(
        "POST",
        "/api/generate/tracing",
        Some(serde_json::json!({"prompt": "number 4"})),
        key,
    )
    .await;

    let third = app
        .request(
            "POST",
            "/api/generate/coloring",
            Some(serde_json::json!({"prompt": "a fish"})),
            key,
        )
        .await;
    assert_eq!(third.status, StatusCode::OK);
    assert_eq!(third.body["guestRemaining"], 0);

    let denied = app
        .request(
            "POST",
            "/api/generate/tracing",
            Some(serde_json::json!({"prompt": "number 5"})),
            key,
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
}
