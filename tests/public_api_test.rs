//! Integration tests for the public (unauthenticated) endpoints.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_limits_publishes_quota_config() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/limits", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["guestLimit"], 3);
    assert_eq!(response.body["guestSoftLimit"], 2);
    assert_eq!(response.body["guestWindowHours"], 24);
    assert_eq!(response.body["freeDailyLimit"], 5);
}

#[tokio::test]
async fn test_me_requires_authentication() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_requires_authentication() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/admin/users", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_newsletter_rejects_invalid_email() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/newsletter/subscribe",
            Some(serde_json::json!({"email": "not-an-email"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_webhook_rejects_missing_signature() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/billing/webhook",
            Some(serde_json::json!({"id": "evt_1", "type": "noop", "data": {"object": {}}})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/nope", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
