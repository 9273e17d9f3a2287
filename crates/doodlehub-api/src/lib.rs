//! # doodlehub-api
//!
//! HTTP API layer for DoodleHub built on Axum.
//!
//! Provides the generation endpoints, account and newsletter routes,
//! billing checkout/webhook, the admin console API, middleware (request
//! logging, CORS), extractors, and DTOs.

pub mod app;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_state, run_server};
pub use state::AppState;
