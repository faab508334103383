//! Handlers for selection sequencing and participation status.
//!
//! Reorders are computed in core as a full renumbering batch and persisted
//! in one transaction. On any persistence failure the handler returns the
//! error without touching local bookkeeping; clients re-fetch the round to
//! restore a consistent view.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ringside_core::entry_status::{EntryStatus, EntryType};
use ringside_core::error::CoreError;
use ringside_core::sequencing;
use ringside_core::types::DbId;
use ringside_db::models::selection::{CreateSelection, Selection, UpdateSelection};
use ringside_db::repositories::{RoundRepo, SelectionRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/rounds/{round_id}/selections
///
/// Appends the entry to the end of the round's running order: max existing
/// position plus one, or 1 for an empty round.
pub async fn append(
    State(state): State<AppState>,
    Path(round_id): Path<DbId>,
    Json(input): Json<CreateSelection>,
) -> AppResult<(StatusCode, Json<Selection>)> {
    RoundRepo::find_by_id(&state.pool, round_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Round",
            id: round_id,
        }))?;

    let entry_type = match input.entry_type.as_deref() {
        Some(value) => EntryType::from_str_value(value)?,
        None => EntryType::Regular,
    };

    let positions = SelectionRepo::positions_for_round(&state.pool, round_id).await?;
    let position = sequencing::next_position(&positions);

    let selection = SelectionRepo::create(
        &state.pool,
        input.entry_id,
        round_id,
        position,
        entry_type.as_str(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(selection)))
}

/// GET /api/v1/rounds/{round_id}/selections
pub async fn list_by_round(
    State(state): State<AppState>,
    Path(round_id): Path<DbId>,
) -> AppResult<Json<Vec<Selection>>> {
    Ok(Json(SelectionRepo::list_for_round(&state.pool, round_id).await?))
}

/// Request body for a reorder.
#[derive(Debug, Deserialize, Validate)]
pub struct ReorderRequest {
    #[validate(range(min = 1))]
    pub target_position: i32,
}

/// POST /api/v1/rounds/{round_id}/selections/{id}/reorder
///
/// Returns the round's full selection list in the new order.
pub async fn reorder(
    State(state): State<AppState>,
    Path((round_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<Vec<Selection>>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let current = SelectionRepo::list_for_round(&state.pool, round_id).await?;
    let ordered_ids: Vec<DbId> = current.iter().map(|s| s.id).collect();

    let batch = sequencing::reorder(&ordered_ids, id, input.target_position)?;
    SelectionRepo::batch_update_positions(&state.pool, &batch).await?;

    // Reload so the response reflects persisted state.
    let updated = SelectionRepo::list_for_round(&state.pool, round_id).await?;
    Ok(Json(updated))
}

/// PATCH /api/v1/selections/{id}
///
/// Status changes go through the state machine; sibling positions are
/// never renumbered by a status or entry-type edit.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSelection>,
) -> AppResult<Json<Selection>> {
    let existing = SelectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Selection",
            id,
        }))?;

    if let Some(new_status) = input.entry_status.as_deref() {
        let from = existing.status()?;
        let to = EntryStatus::from_str_value(new_status)?;
        if from != to {
            from.validate_transition(to)?;
        }
    }
    if let Some(entry_type) = input.entry_type.as_deref() {
        EntryType::from_str_value(entry_type)?;
    }

    let updated = SelectionRepo::update_status(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Selection",
            id,
        }))?;
    Ok(Json(updated))
}
