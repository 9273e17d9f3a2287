//! Admin activity log handlers.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use doodlehub_core::error::AppError;
use doodlehub_core::types::pagination::PageResponse;
use doodlehub_entity::activity::{Activity, ActivityKind};

use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Optional kind filter for the activity list.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityFilterParams {
    /// Filter by activity kind.
    pub kind: Option<String>,
}

/// GET /api/admin/activities
pub async fn list_activities(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<ActivityFilterParams>,
) -> Result<Json<ApiResponse<PageResponse<Activity>>>, AppError> {
    let kind = filter
        .kind
        .as_deref()
        .map(ActivityKind::from_str)
        .transpose()?;

    let page = state
        .admin_service
        .list_activities(&auth, kind, pagination.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page)))
}
