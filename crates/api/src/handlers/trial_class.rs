//! Handlers for the `/classes` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ringside_core::error::CoreError;
use ringside_core::types::DbId;
use ringside_db::models::trial_class::{CreateTrialClass, TrialClass};
use ringside_db::repositories::ClassRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/days/{day_id}/classes
///
/// Overrides `input.day_id` with the value from the URL path.
pub async fn create(
    State(state): State<AppState>,
    Path(day_id): Path<DbId>,
    Json(mut input): Json<CreateTrialClass>,
) -> AppResult<(StatusCode, Json<TrialClass>)> {
    input.day_id = day_id;
    let class = ClassRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(class)))
}

/// GET /api/v1/days/{day_id}/classes
pub async fn list_by_day(
    State(state): State<AppState>,
    Path(day_id): Path<DbId>,
) -> AppResult<Json<Vec<TrialClass>>> {
    Ok(Json(ClassRepo::list_for_day(&state.pool, day_id).await?))
}

/// GET /api/v1/classes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TrialClass>> {
    let class = ClassRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Class", id }))?;
    Ok(Json(class))
}
