//! Newsletter handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use doodlehub_core::error::AppError;

use crate::dto::request::NewsletterRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/newsletter/subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    Json(req): Json<NewsletterRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    state.newsletter_service.subscribe(&req.email).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Subscribed to the newsletter".to_string(),
    })))
}

/// POST /api/newsletter/unsubscribe
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(req): Json<NewsletterRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    state.newsletter_service.unsubscribe(&req.email).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Unsubscribed from the newsletter".to_string(),
    })))
}
