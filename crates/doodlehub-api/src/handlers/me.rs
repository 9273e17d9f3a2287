//! Account self-service handlers.

use axum::Json;
use axum::extract::{Query, State};
use serde::Serialize;

use doodlehub_core::error::AppError;
use doodlehub_core::types::pagination::PageResponse;
use doodlehub_entity::activity::Activity;
use doodlehub_service::user::UsageSummary;

use crate::dto::response::{ApiResponse, UserResponse};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Profile plus today's usage.
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    /// The user's profile.
    pub user: UserResponse,
    /// Today's usage against the plan limit.
    pub usage: UsageSummary,
}

/// GET /api/me
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MeResponse>>, AppError> {
    let user = state.user_service.get_profile(&auth).await?;
    let usage = state.user_service.usage(&auth).await?;

    Ok(Json(ApiResponse::ok(MeResponse {
        user: UserResponse::from(user),
        usage,
    })))
}

/// GET /api/me/activities
pub async fn activities(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Activity>>>, AppError> {
    let page = state
        .user_service
        .activities(&auth, params.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page)))
}
