//! Admin dashboard stats handler.

use axum::Json;
use axum::extract::State;

use doodlehub_core::error::AppError;
use doodlehub_service::admin::AdminStats;

use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<AdminStats>>, AppError> {
    let stats = state.admin_service.stats(&auth).await?;
    Ok(Json(ApiResponse::ok(stats)))
}
