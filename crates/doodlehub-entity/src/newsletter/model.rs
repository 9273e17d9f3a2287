//! Newsletter subscription entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A newsletter subscription keyed by email.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NewsletterSubscription {
    /// Unique subscription identifier.
    pub id: Uuid,
    /// Subscriber email (unique).
    pub email: String,
    /// When the subscription was (last) created.
    pub subscribed_at: DateTime<Utc>,
    /// Set when the subscriber opted out; cleared on re-subscribe.
    pub unsubscribed_at: Option<DateTime<Utc>>,
}

impl NewsletterSubscription {
    /// Whether this subscription is currently active.
    pub fn is_active(&self) -> bool {
        self.unsubscribed_at.is_none()
    }
}
