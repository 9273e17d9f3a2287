//! Payment processor configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the external payment processor (Stripe-compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Base URL of the payment processor API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Secret API key.
    pub api_key: String,
    /// Price identifier for the premium subscription.
    pub premium_price_id: String,
    /// Webhook signing secret.
    pub webhook_secret: String,
    /// URL the processor redirects to after a successful checkout.
    pub success_url: String,
    /// URL the processor redirects to after a cancelled checkout.
    pub cancel_url: String,
    /// Maximum accepted webhook timestamp age in seconds.
    #[serde(default = "default_webhook_tolerance")]
    pub webhook_tolerance_seconds: u64,
}

fn default_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}

fn default_webhook_tolerance() -> u64 {
    300
}
