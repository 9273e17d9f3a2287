//! Route definitions for the DoodleHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(generate_routes())
        .merge(account_routes())
        .merge(newsletter_routes())
        .merge(billing_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Quota-gated generation endpoints plus the public limits.
fn generate_routes() -> Router<AppState> {
    Router::new()
        .route("/generate/coloring", post(handlers::generate::coloring))
        .route(
            "/generate/tracing",
            post(handlers::generate::tracing_worksheet),
        )
        .route("/limits", get(handlers::limits::limits))
}

/// Account self-service endpoints.
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::me::profile))
        .route("/me/activities", get(handlers::me::activities))
}

/// Newsletter endpoints.
fn newsletter_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/newsletter/subscribe",
            post(handlers::newsletter::subscribe),
        )
        .route(
            "/newsletter/unsubscribe",
            post(handlers::newsletter::unsubscribe),
        )
}

/// Billing endpoints.
fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/billing/checkout", post(handlers::billing::checkout))
        .route("/billing/webhook", post(handlers::billing::webhook))
}

/// Admin-only endpoints.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route("/admin/users/{id}", get(handlers::admin::users::get_user))
        .route(
            "/admin/users/{id}/plan",
            put(handlers::admin::users::set_plan),
        )
        .route(
            "/admin/users/{id}/status",
            put(handlers::admin::users::set_status),
        )
        .route(
            "/admin/activities",
            get(handlers::admin::activities::list_activities),
        )
        .route("/admin/stats", get(handlers::admin::stats::stats))
}

/// Health endpoints.
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
