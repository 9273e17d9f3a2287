//! Newsletter subscription repository implementation.

use sqlx::PgPool;

use doodlehub_core::error::{AppError, ErrorKind};
use doodlehub_core::result::AppResult;
use doodlehub_entity::newsletter::NewsletterSubscription;

/// Repository for newsletter subscriptions.
#[derive(Debug, Clone)]
pub struct NewsletterRepository {
    pool: PgPool,
}

impl NewsletterRepository {
    /// Create a new newsletter repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a subscription by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<NewsletterSubscription>> {
        sqlx::query_as::<_, NewsletterSubscription>(
            "SELECT * FROM newsletter_subscriptions WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find subscription", e))
    }

    /// Subscribe an email, re-activating a prior opt-out if present.
    pub async fn subscribe(&self, email: &str) -> AppResult<NewsletterSubscription> {
        sqlx::query_as::<_, NewsletterSubscription>(
            "INSERT INTO newsletter_subscriptions (email) VALUES (LOWER($1)) \
             ON CONFLICT (email) DO UPDATE \
             SET subscribed_at = NOW(), unsubscribed_at = NULL \
             RETURNING *",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to subscribe", e))
    }

    /// Mark an email as unsubscribed.
    pub async fn unsubscribe(&self, email: &str) -> AppResult<Option<NewsletterSubscription>> {
        sqlx::query_as::<_, NewsletterSubscription>(
            "UPDATE newsletter_subscriptions SET unsubscribed_at = NOW() \
             WHERE LOWER(email) = LOWER($1) AND unsubscribed_at IS NULL \
             RETURNING *",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to unsubscribe", e))
    }

    /// Number of active subscriptions.
    pub async fn count_active(&self) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM newsletter_subscriptions WHERE unsubscribed_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count subscriptions", e))
    }
}
