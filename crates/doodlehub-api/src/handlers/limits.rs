//! Public quota limits handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::LimitsResponse;
use crate::state::AppState;

/// GET /api/limits
///
/// Publishes the quota constants so the frontend pre-check reads the
/// same configuration the server enforces.
pub async fn limits(State(state): State<AppState>) -> Json<LimitsResponse> {
    let quota = &state.config.quota;

    Json(LimitsResponse {
        guest_limit: quota.guest_limit,
        guest_soft_limit: quota.guest_soft_limit,
        guest_window_hours: quota.guest_window_hours,
        free_daily_limit: quota.free_daily_limit,
    })
}
