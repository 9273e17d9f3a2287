//! Billing handlers — checkout initiation and the processor webhook.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use bytes::Bytes;

use doodlehub_core::error::AppError;

use crate::dto::response::{ApiResponse, CheckoutResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/billing/checkout
pub async fn checkout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CheckoutResponse>>, AppError> {
    let session = state.billing_service.checkout(&auth).await?;

    Ok(Json(ApiResponse::ok(CheckoutResponse {
        checkout_url: session.url,
    })))
}

/// POST /api/billing/webhook
///
/// Raw body: the signature covers the exact bytes as delivered.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::validation("Missing Stripe-Signature header"))?;

    state.billing_service.handle_webhook(&body, signature).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Event processed".to_string(),
    })))
}
