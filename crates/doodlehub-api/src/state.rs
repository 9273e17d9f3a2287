//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use doodlehub_auth::TokenVerifier;
use doodlehub_cache::CacheManager;
use doodlehub_core::config::AppConfig;
use doodlehub_service::admin::AdminService;
use doodlehub_service::billing::BillingService;
use doodlehub_service::generation::GenerationService;
use doodlehub_service::newsletter::NewsletterService;
use doodlehub_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Cache manager (Redis or in-memory).
    pub cache: Arc<CacheManager>,
    /// Verifier for provider-issued access tokens.
    pub token_verifier: Arc<TokenVerifier>,
    /// Generation orchestration service.
    pub generation_service: Arc<GenerationService>,
    /// User provisioning and profile service.
    pub user_service: Arc<UserService>,
    /// Newsletter service.
    pub newsletter_service: Arc<NewsletterService>,
    /// Admin console service.
    pub admin_service: Arc<AdminService>,
    /// Billing service.
    pub billing_service: Arc<BillingService>,
}
