//! Handlers for the `/rounds` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ringside_core::error::CoreError;
use ringside_core::scoring::Discipline;
use ringside_core::types::DbId;
use ringside_db::models::round::{CreateRound, Round, UpdateRound};
use ringside_db::repositories::RoundRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/classes/{class_id}/rounds
///
/// Overrides `input.class_id` with the value from the URL path.
pub async fn create(
    State(state): State<AppState>,
    Path(class_id): Path<DbId>,
    Json(mut input): Json<CreateRound>,
) -> AppResult<(StatusCode, Json<Round>)> {
    input.class_id = class_id;
    // Reject unknown disciplines before they reach the database.
    Discipline::from_str_value(&input.discipline)?;
    let round = RoundRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(round)))
}

/// GET /api/v1/classes/{class_id}/rounds
pub async fn list_by_class(
    State(state): State<AppState>,
    Path(class_id): Path<DbId>,
) -> AppResult<Json<Vec<Round>>> {
    Ok(Json(RoundRepo::list_for_class(&state.pool, class_id).await?))
}

/// PUT /api/v1/rounds/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRound>,
) -> AppResult<Json<Round>> {
    let round = RoundRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Round", id }))?;
    Ok(Json(round))
}
