//! `AuthUser` extractor — requires a valid provider token and injects the
//! request context.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use std::net::SocketAddr;

use doodlehub_core::error::AppError;
use doodlehub_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let claims = state.token_verifier.verify(token)?;
        let user = state.user_service.ensure_user(&claims).await?;

        if !user.is_active() {
            return Err(AppError::authorization("Account is disabled"));
        }

        let ctx = RequestContext::new(
            user.id,
            user.email,
            user.plan,
            user.role,
            client_ip(parts),
        );

        Ok(AuthUser(ctx))
    }
}

/// Pull the bearer token out of the Authorization header, if present.
pub(crate) fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Best-effort client address: first `x-forwarded-for` hop, then the
/// socket peer, then a fixed placeholder.
pub(crate) fn client_ip(parts: &Parts) -> String {
    if let Some(forwarded) = parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
