//! Generation handlers — coloring pages and tracing worksheets.

use axum::Json;
use axum::extract::State;

use doodlehub_core::error::AppError;
use doodlehub_entity::activity::ActivityKind;

use crate::dto::request::GenerateRequest;
use crate::dto::response::GenerationResponse;
use crate::extractors::Caller;
use crate::state::AppState;

/// POST /api/generate/coloring
pub async fn coloring(
    State(state): State<AppState>,
    caller: Caller,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerationResponse>, AppError> {
    let output = state
        .generation_service
        .generate(&caller.identity, ActivityKind::Coloring, &req.prompt)
        .await?;

    Ok(Json(GenerationResponse::from(output)))
}

/// POST /api/generate/tracing
pub async fn tracing_worksheet(
    State(state): State<AppState>,
    caller: Caller,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerationResponse>, AppError> {
    let output = state
        .generation_service
        .generate(&caller.identity, ActivityKind::Tracing, &req.prompt)
        .await?;

    Ok(Json(GenerationResponse::from(output)))
}
