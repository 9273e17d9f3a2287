//! `Caller` extractor — resolves the quota identity for generation
//! endpoints.
//!
//! Unauthenticated and invalid-token requests resolve to the guest path
//! keyed by client address; they are not errors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use doodlehub_core::error::AppError;
use doodlehub_quota::CallerIdentity;

use crate::extractors::auth::{bearer_token, client_ip};
use crate::state::AppState;

/// The resolved caller of a generation endpoint.
#[derive(Debug, Clone)]
pub struct Caller {
    /// Identity the quota policy evaluates.
    pub identity: CallerIdentity,
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(Self {
                identity: CallerIdentity::guest(client_ip(parts)),
            });
        };

        // A token that does not verify is treated as absent, not as an
        // error: the caller simply stays on the guest path.
        let Ok(claims) = state.token_verifier.verify(token) else {
            return Ok(Self {
                identity: CallerIdentity::guest(client_ip(parts)),
            });
        };

        let user = state.user_service.ensure_user(&claims).await?;
        if !user.is_active() {
            return Err(AppError::authorization("Account is disabled"));
        }

        Ok(Self {
            identity: CallerIdentity::registered(user.id, user.plan),
        })
    }
}
