//! Checkout initiation and webhook processing.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use doodlehub_billing::{CheckoutSession, StripeClient, WebhookEvent, verify_signature};
use doodlehub_cache::keys;
use doodlehub_core::config::billing::BillingConfig;
use doodlehub_core::error::AppError;
use doodlehub_core::result::AppResult;
use doodlehub_core::traits::cache::CacheProvider;
use doodlehub_database::repositories::user::UserRepository;

use crate::context::RequestContext;

/// How long processed webhook event IDs are remembered for dedup.
const WEBHOOK_DEDUP_TTL: Duration = Duration::from_secs(24 * 3600);

/// Handles premium checkout and processor webhooks.
#[derive(Debug, Clone)]
pub struct BillingService {
    stripe: Arc<StripeClient>,
    users: Arc<UserRepository>,
    cache: Arc<dyn CacheProvider>,
    config: BillingConfig,
}

impl BillingService {
    /// Creates a new billing service.
    pub fn new(
        stripe: Arc<StripeClient>,
        users: Arc<UserRepository>,
        cache: Arc<dyn CacheProvider>,
        config: BillingConfig,
    ) -> Self {
        Self {
            stripe,
            users,
            cache,
            config,
        }
    }

    /// Start a premium checkout for the current user.
    pub async fn checkout(&self, ctx: &RequestContext) -> AppResult<CheckoutSession> {
        let user = self
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if user.is_premium() {
            return Err(AppError::conflict("Account is already premium"));
        }

        self.stripe
            .create_checkout_session(user.id, &user.email)
            .await
    }

    /// Verify and apply one webhook delivery.
    ///
    /// Unknown event types are acknowledged and ignored; replayed event
    /// IDs are dropped via the cache.
    pub async fn handle_webhook(&self, payload: &[u8], signature_header: &str) -> AppResult<()> {
        verify_signature(
            &self.config.webhook_secret,
            payload,
            signature_header,
            self.config.webhook_tolerance_seconds,
            Utc::now().timestamp(),
        )?;

        let event = WebhookEvent::parse(payload)?;

        let fresh = self
            .cache
            .set_nx(&keys::webhook_event(&event.id), "1", WEBHOOK_DEDUP_TTL)
            .await?;
        if !fresh {
            info!(event_id = %event.id, "Webhook event already processed");
            return Ok(());
        }

        match event.event_type.as_str() {
            "checkout.session.completed" => self.apply_checkout_completed(&event).await,
            "customer.subscription.deleted" => self.apply_subscription_deleted(&event).await,
            other => {
                info!(event_type = other, "Ignoring webhook event type");
                Ok(())
            }
        }
    }

    /// Promote the purchasing user to premium.
    async fn apply_checkout_completed(&self, event: &WebhookEvent) -> AppResult<()> {
        let session = event.checkout_session()?;

        let Some(reference) = session.client_reference_id.as_deref() else {
            warn!(event_id = %event.id, "Checkout completed without a client reference");
            return Ok(());
        };
        let user_id = Uuid::from_str(reference)
            .map_err(|_| AppError::validation("Invalid client reference in webhook"))?;

        let customer = session.customer.as_deref().unwrap_or_default();
        let subscription = session.subscription.as_deref().unwrap_or_default();

        let user = self
            .users
            .set_billing_link(user_id, customer, subscription)
            .await?;

        info!(user_id = %user.id, "User upgraded to premium");
        Ok(())
    }

    /// Revert the owner of a cancelled subscription to the free plan.
    async fn apply_subscription_deleted(&self, event: &WebhookEvent) -> AppResult<()> {
        let subscription = event.subscription()?;

        let Some(user) = self
            .users
            .find_by_billing_subscription(&subscription.id)
            .await?
        else {
            warn!(subscription = %subscription.id, "No user for cancelled subscription");
            return Ok(());
        };

        self.users.clear_billing_link(user.id).await?;
        info!(user_id = %user.id, "User reverted to free plan");
        Ok(())
    }
}
