//! Handlers for the `/entries` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ringside_core::error::CoreError;
use ringside_core::types::DbId;
use ringside_db::models::entry::{CreateEntry, Entry};
use ringside_db::repositories::EntryRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/trials/{trial_id}/entries
///
/// Overrides `input.trial_id` with the value from the URL path.
pub async fn create(
    State(state): State<AppState>,
    Path(trial_id): Path<DbId>,
    Json(mut input): Json<CreateEntry>,
) -> AppResult<(StatusCode, Json<Entry>)> {
    input.trial_id = trial_id;
    if input.handler_name.trim().is_empty() || input.dog_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Handler and dog names must not be empty".to_string(),
        )));
    }
    let entry = EntryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/trials/{trial_id}/entries
pub async fn list_by_trial(
    State(state): State<AppState>,
    Path(trial_id): Path<DbId>,
) -> AppResult<Json<Vec<Entry>>> {
    Ok(Json(EntryRepo::list_for_trial(&state.pool, trial_id).await?))
}
