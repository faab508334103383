//! Handlers for the `/trials` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ringside_core::error::CoreError;
use ringside_core::types::DbId;
use ringside_db::models::trial::{CreateTrial, Trial};
use ringside_db::repositories::TrialRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/trials
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTrial>,
) -> AppResult<(StatusCode, Json<Trial>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Trial name must not be empty".to_string(),
        )));
    }
    let trial = TrialRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(trial)))
}

/// GET /api/v1/trials
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Trial>>> {
    Ok(Json(TrialRepo::list(&state.pool).await?))
}

/// GET /api/v1/trials/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Trial>> {
    let trial = TrialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Trial", id }))?;
    Ok(Json(trial))
}
