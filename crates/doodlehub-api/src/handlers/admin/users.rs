//! Admin user management handlers.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use doodlehub_core::error::AppError;
use doodlehub_core::types::pagination::PageResponse;
use doodlehub_entity::user::{UserPlan, UserStatus};

use crate::dto::request::{SetPlanRequest, SetStatusRequest};
use crate::dto::response::{ApiResponse, UserResponse};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Optional plan/status filters for the user list.
#[derive(Debug, Clone, Deserialize)]
pub struct UserFilterParams {
    /// Filter by plan.
    pub plan: Option<String>,
    /// Filter by status.
    pub status: Option<String>,
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<UserFilterParams>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, AppError> {
    let plan = filter.plan.as_deref().map(UserPlan::from_str).transpose()?;
    let status = filter
        .status
        .as_deref()
        .map(UserStatus::from_str)
        .transpose()?;

    let page = state
        .admin_service
        .list_users(&auth, plan, status, pagination.into_page_request())
        .await?;

    let users = PageResponse::new(
        page.items.into_iter().map(UserResponse::from).collect(),
        page.page,
        page.page_size,
        page.total_items,
    );

    Ok(Json(ApiResponse::ok(users)))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.admin_service.get_user(&auth, id).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// PUT /api/admin/users/{id}/plan
pub async fn set_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SetPlanRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let plan = UserPlan::from_str(&req.plan)?;
    let user = state.admin_service.set_plan(&auth, id, plan).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// PUT /api/admin/users/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let status = UserStatus::from_str(&req.status)?;
    let user = state.admin_service.set_status(&auth, id, status).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}
