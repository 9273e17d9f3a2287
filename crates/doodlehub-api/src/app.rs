//! Application wiring: state construction and the HTTP server loop.

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use doodlehub_auth::TokenVerifier;
use doodlehub_billing::StripeClient;
use doodlehub_cache::CacheManager;
use doodlehub_core::config::AppConfig;
use doodlehub_core::error::AppError;
use doodlehub_core::result::AppResult;
use doodlehub_core::traits::cache::CacheProvider;
use doodlehub_database::repositories::activity::ActivityRepository;
use doodlehub_database::repositories::newsletter::NewsletterRepository;
use doodlehub_database::repositories::user::UserRepository;
use doodlehub_generate::{ImageGenerator, OpenAiImageClient};
use doodlehub_quota::QuotaPolicy;
use doodlehub_quota::store::{CachedGuestStore, DbUserCounterStore};
use doodlehub_service::admin::AdminService;
use doodlehub_service::billing::BillingService;
use doodlehub_service::generation::GenerationService;
use doodlehub_service::newsletter::NewsletterService;
use doodlehub_service::user::UserService;

use crate::router::build_router;
use crate::state::AppState;

/// Construct the full application state from configuration and a
/// database pool.
pub async fn build_state(config: AppConfig, pool: PgPool) -> AppResult<AppState> {
    let cache = Arc::new(CacheManager::new(&config.cache).await?);
    let cache_provider: Arc<dyn CacheProvider> = cache.clone();

    let token_verifier = Arc::new(TokenVerifier::new(&config.auth));

    // Repositories
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let activity_repo = Arc::new(ActivityRepository::new(pool.clone()));
    let newsletter_repo = Arc::new(NewsletterRepository::new(pool.clone()));

    // Quota policy: guest counters in the cache (process-local for the
    // memory provider, shared for Redis), user counters on the user row.
    let guest_store = Arc::new(CachedGuestStore::new(cache_provider.clone()));
    let user_counter_store = Arc::new(DbUserCounterStore::new(user_repo.clone()));
    let quota = Arc::new(QuotaPolicy::new(
        guest_store,
        user_counter_store,
        config.quota.clone(),
    ));

    // External clients
    let generator: Arc<dyn ImageGenerator> = Arc::new(OpenAiImageClient::new(&config.generation)?);
    let stripe = Arc::new(StripeClient::new(&config.billing)?);

    // Services
    let generation_service = Arc::new(GenerationService::new(
        quota.clone(),
        generator,
        activity_repo.clone(),
    ));
    let user_service = Arc::new(UserService::new(
        user_repo.clone(),
        activity_repo.clone(),
        config.quota.clone(),
    ));
    let newsletter_service = Arc::new(NewsletterService::new(newsletter_repo.clone()));
    let admin_service = Arc::new(AdminService::new(
        user_repo.clone(),
        activity_repo,
        newsletter_repo,
    ));
    let billing_service = Arc::new(BillingService::new(
        stripe,
        user_repo,
        cache_provider,
        config.billing.clone(),
    ));

    Ok(AppState {
        config: Arc::new(config),
        db_pool: pool,
        cache,
        token_verifier,
        generation_service,
        user_service,
        newsletter_service,
        admin_service,
        billing_service,
    })
}

/// Build the state and run the HTTP server until shutdown.
pub async fn run_server(config: AppConfig, pool: PgPool) -> AppResult<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config, pool).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("DoodleHub server listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("DoodleHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
