//! Integration tests for webhook delivery handling.

mod helpers;

use chrono::Utc;
use hmac::{Hmac, Mac};
use http::StatusCode;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Sign a payload the way the processor does.
fn sign(payload: &str, timestamp: i64) -> String {
    let mut mac = HmacSha256::new_from_slice(helpers::WEBHOOK_SECRET.as_bytes()).unwrap();
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    format!(
        "t={timestamp},v1={}",
        hex::encode(mac.finalize().into_bytes())
    )
}

#[tokio::test]
async fn test_valid_signature_with_unknown_event_is_acknowledged() {
    let app = helpers::TestApp::new();
    let payload = r#"{"id":"evt_unknown","type":"invoice.paid","data":{"object":{}}}"#;
    let signature = sign(payload, Utc::now().timestamp());

    let response = app.post_webhook(payload, Some(&signature)).await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_replayed_event_id_is_dropped() {
    let app = helpers::TestApp::new();
    let payload = r#"{"id":"evt_replay","type":"invoice.paid","data":{"object":{}}}"#;
    let signature = sign(payload, Utc::now().timestamp());

    let first = app.post_webhook(payload, Some(&signature)).await;
    assert_eq!(first.status, StatusCode::OK);

    // Same event id again: acknowledged without reprocessing.
    let second = app.post_webhook(payload, Some(&signature)).await;
    assert_eq!(second.status, StatusCode::OK);
}

#[tokio::test]
async fn test_bad_signature_is_rejected() {
    let app = helpers::TestApp::new();
    let payload = r#"{"id":"evt_bad","type":"invoice.paid","data":{"object":{}}}"#;
    let signature = sign(r#"{"id":"evt_other"}"#, Utc::now().timestamp());

    let response = app.post_webhook(payload, Some(&signature)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stale_timestamp_is_rejected() {
    let app = helpers::TestApp::new();
    let payload = r#"{"id":"evt_old","type":"invoice.paid","data":{"object":{}}}"#;
    let signature = sign(payload, Utc::now().timestamp() - 3600);

    let response = app.post_webhook(payload, Some(&signature)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
