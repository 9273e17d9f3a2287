//! Newsletter subscribe/unsubscribe.

use std::sync::Arc;

use tracing::info;

use doodlehub_core::error::AppError;
use doodlehub_core::result::AppResult;
use doodlehub_database::repositories::newsletter::NewsletterRepository;
use doodlehub_entity::newsletter::NewsletterSubscription;

/// Handles newsletter subscriptions.
#[derive(Debug, Clone)]
pub struct NewsletterService {
    subscriptions: Arc<NewsletterRepository>,
}

impl NewsletterService {
    /// Creates a new newsletter service.
    pub fn new(subscriptions: Arc<NewsletterRepository>) -> Self {
        Self { subscriptions }
    }

    /// Subscribe an email address. Re-subscribing is idempotent.
    pub async fn subscribe(&self, email: &str) -> AppResult<NewsletterSubscription> {
        let email = normalize_email(email)?;
        let subscription = self.subscriptions.subscribe(&email).await?;
        info!("Newsletter subscription recorded");
        Ok(subscription)
    }

    /// Unsubscribe an email address.
    pub async fn unsubscribe(&self, email: &str) -> AppResult<NewsletterSubscription> {
        let email = normalize_email(email)?;
        self.subscriptions
            .unsubscribe(&email)
            .await?
            .ok_or_else(|| AppError::not_found("No active subscription for this email"))
    }
}

/// Trim and sanity-check an email address.
fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    if !email.contains('@') || !email.contains('.') {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(email.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Parent@Example.COM ").unwrap(),
            "parent@example.com"
        );
        assert!(normalize_email("").is_err());
        assert!(normalize_email("not-an-email").is_err());
    }
}
