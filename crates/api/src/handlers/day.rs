//! Handlers for the `/days` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ringside_core::error::CoreError;
use ringside_core::types::DbId;
use ringside_db::models::day::{CreateDay, Day};
use ringside_db::repositories::DayRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/trials/{trial_id}/days
///
/// Overrides `input.trial_id` with the value from the URL path.
pub async fn create(
    State(state): State<AppState>,
    Path(trial_id): Path<DbId>,
    Json(mut input): Json<CreateDay>,
) -> AppResult<(StatusCode, Json<Day>)> {
    input.trial_id = trial_id;
    let day = DayRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(day)))
}

/// GET /api/v1/trials/{trial_id}/days
pub async fn list_by_trial(
    State(state): State<AppState>,
    Path(trial_id): Path<DbId>,
) -> AppResult<Json<Vec<Day>>> {
    Ok(Json(DayRepo::list_for_trial(&state.pool, trial_id).await?))
}

/// GET /api/v1/days/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Day>> {
    let day = DayRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Day", id }))?;
    Ok(Json(day))
}
