//! Webhook event parsing and signature verification.
//!
//! The processor signs each delivery with
//! `Stripe-Signature: t=<unix>,v1=<hex hmac-sha256>` over
//! `"{timestamp}.{payload}"`. Deliveries older than the configured
//! tolerance are rejected to block replays.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use tracing::warn;

use doodlehub_core::error::AppError;
use doodlehub_core::result::AppResult;

type HmacSha256 = Hmac<Sha256>;

/// A parsed webhook event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Event identifier (used for dedup).
    pub id: String,
    /// Event type, e.g. `"checkout.session.completed"`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event payload.
    pub data: WebhookData,
}

/// The `data` envelope of a webhook event.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookData {
    /// The object the event describes, shape depends on `event_type`.
    pub object: serde_json::Value,
}

/// Object payload of `checkout.session.completed`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionObject {
    /// Session identifier.
    pub id: String,
    /// Customer identifier created for the purchase.
    pub customer: Option<String>,
    /// Subscription started by the purchase.
    pub subscription: Option<String>,
    /// The user ID we supplied at session creation.
    pub client_reference_id: Option<String>,
}

/// Object payload of `customer.subscription.deleted`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionObject {
    /// Subscription identifier.
    pub id: String,
    /// Owning customer identifier.
    pub customer: Option<String>,
}

impl WebhookEvent {
    /// Parse the raw payload after verifying its signature.
    pub fn parse(payload: &[u8]) -> AppResult<Self> {
        serde_json::from_slice(payload)
            .map_err(|e| AppError::validation(format!("Invalid webhook payload: {e}")))
    }

    /// Interpret the event object as a completed checkout session.
    pub fn checkout_session(&self) -> AppResult<CheckoutSessionObject> {
        serde_json::from_value(self.data.object.clone())
            .map_err(|e| AppError::validation(format!("Invalid checkout session object: {e}")))
    }

    /// Interpret the event object as a subscription.
    pub fn subscription(&self) -> AppResult<SubscriptionObject> {
        serde_json::from_value(self.data.object.clone())
            .map_err(|e| AppError::validation(format!("Invalid subscription object: {e}")))
    }
}

/// Verify a webhook delivery signature.
///
/// `now_unix` is injected so expiry is testable.
pub fn verify_signature(
    secret: &str,
    payload: &[u8],
    signature_header: &str,
    tolerance_seconds: u64,
    now_unix: i64,
) -> AppResult<()> {
    let (timestamp, expected_hex) = parse_signature_header(signature_header)?;

    let ts: i64 = timestamp
        .parse()
        .map_err(|_| AppError::validation("Invalid webhook timestamp"))?;

    if now_unix.abs_diff(ts) > tolerance_seconds {
        warn!(timestamp = ts, "Webhook timestamp outside tolerance");
        return Err(AppError::validation(
            "Webhook timestamp is too old or in the future",
        ));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::configuration("Invalid webhook secret"))?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    let computed = hex::encode(mac.finalize().into_bytes());

    if !constant_time_eq(computed.as_bytes(), expected_hex.as_bytes()) {
        warn!("Webhook signature verification failed");
        return Err(AppError::validation("Invalid webhook signature"));
    }

    Ok(())
}

/// Split `t=<unix>,v1=<hex>` into its parts.
fn parse_signature_header(header: &str) -> AppResult<(&str, &str)> {
    let mut timestamp = None;
    let mut signature = None;

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => signature = Some(value),
            _ => {}
        }
    }

    match (timestamp, signature) {
        (Some(t), Some(v)) => Ok((t, v)),
        _ => Err(AppError::validation("Malformed signature header")),
    }
}

/// Constant-time byte comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";

    fn sign(payload: &[u8], timestamp: i64) -> String {
        let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        format!("t={timestamp},v1={}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn test_valid_signature_accepted() {
        let payload = br#"{"id":"evt_1","type":"checkout.session.completed","data":{"object":{}}}"#;
        let header = sign(payload, 1_700_000_000);
        assert!(verify_signature(SECRET, payload, &header, 300, 1_700_000_100).is_ok());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let payload = br#"{"id":"evt_1"}"#;
        let header = sign(payload, 1_700_000_000);
        assert!(verify_signature(SECRET, br#"{"id":"evt_2"}"#, &header, 300, 1_700_000_100).is_err());
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let payload = br#"{"id":"evt_1"}"#;
        let header = sign(payload, 1_700_000_000);
        assert!(verify_signature(SECRET, payload, &header, 300, 1_700_001_000).is_err());
    }

    #[test]
    fn test_malformed_header_rejected() {
        assert!(verify_signature(SECRET, b"{}", "v1=abc", 300, 0).is_err());
        assert!(verify_signature(SECRET, b"{}", "nonsense", 300, 0).is_err());
    }

    #[test]
    fn test_event_parsing() {
        let payload = br#"{
            "id": "evt_42",
            "type": "checkout.session.completed",
            "data": {
                "object": {
                    "id": "cs_1",
                    "customer": "cus_9",
                    "subscription": "sub_7",
                    "client_reference_id": "3f2e7c1a-52a8-4f0b-9c3d-9a4f8e7d6c5b"
                }
            }
        }"#;
        let event = WebhookEvent::parse(payload).unwrap();
        assert_eq!(event.event_type, "checkout.session.completed");

        let session = event.checkout_session().unwrap();
        assert_eq!(session.customer.as_deref(), Some("cus_9"));
        assert_eq!(session.subscription.as_deref(), Some("sub_7"));
    }
}
