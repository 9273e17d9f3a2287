//! Checkout session creation against the payment processor API.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use doodlehub_core::config::billing::BillingConfig;
use doodlehub_core::error::{AppError, ErrorKind};
use doodlehub_core::result::AppResult;

/// A created checkout session the frontend redirects to.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Session identifier.
    pub id: String,
    /// Hosted checkout URL.
    pub url: String,
}

/// Error body the processor returns on failure.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// HTTP client for the payment processor's checkout API.
#[derive(Clone)]
pub struct StripeClient {
    http: Client,
    config: BillingConfig,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("api_base_url", &self.config.api_base_url)
            .field("premium_price_id", &self.config.premium_price_id)
            .finish()
    }
}

impl StripeClient {
    /// Create a client from configuration.
    pub fn new(config: &BillingConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Create a subscription checkout session for the premium price.
    ///
    /// The user ID travels as `client_reference_id` so the completion
    /// webhook can attribute the purchase without a customer lookup.
    pub async fn create_checkout_session(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> AppResult<CheckoutSession> {
        let url = format!(
            "{}/v1/checkout/sessions",
            self.config.api_base_url.trim_end_matches('/')
        );
        let user_ref = user_id.to_string();

        debug!(user_id = %user_id, "Creating checkout session");

        let form = [
            ("mode", "subscription"),
            ("line_items[0][price]", self.config.premium_price_id.as_str()),
            ("line_items[0][quantity]", "1"),
            ("success_url", self.config.success_url.as_str()),
            ("cancel_url", self.config.cancel_url.as_str()),
            ("client_reference_id", user_ref.as_str()),
            ("customer_email", email),
        ];

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.api_key, None::<&str>)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Checkout request failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            warn!(status = %status, "Checkout session creation failed");
            return Err(AppError::external_service(format!(
                "Checkout session creation failed: {message}"
            )));
        }

        response.json::<CheckoutSession>().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Invalid checkout response", e)
        })
    }
}
