//! Handlers for the running-order document and the trial roster listing.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use chrono::Utc;
use ringside_core::class_order::{group_rows, DaySchedule, RosterRow};
use ringside_core::error::CoreError;
use ringside_core::recent::is_recently_added;
use ringside_core::running_order::{build_grid, render_document, ScoredRow, TrialInfo};
use ringside_core::scoring::ScoreDraft;
use ringside_core::types::DbId;
use ringside_db::repositories::{DayRepo, ScoreRepo, SelectionRepo, TrialRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/days/{day_id}/running-order
///
/// The printable running-order grid for one day, as a self-contained HTML
/// document.
pub async fn document(
    State(state): State<AppState>,
    Path(day_id): Path<DbId>,
) -> AppResult<Html<String>> {
    let day = DayRepo::find_by_id(&state.pool, day_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Day",
            id: day_id,
        }))?;
    let trial = TrialRepo::find_by_id(&state.pool, day.trial_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Trial",
            id: day.trial_id,
        }))?;

    let details = SelectionRepo::list_detail_for_day(&state.pool, day_id).await?;
    let scores = ScoreRepo::list_for_day(&state.pool, day_id).await?;

    let mut drafts: HashMap<DbId, ScoreDraft> = HashMap::with_capacity(scores.len());
    for score in &scores {
        drafts.insert(score.selection_id, score.to_draft()?);
    }

    let rows: Vec<ScoredRow> = details
        .into_iter()
        .map(|detail| {
            let score = drafts.remove(&detail.selection_id);
            Ok(ScoredRow {
                roster: detail.into_roster_row()?,
                score,
            })
        })
        .collect::<Result<_, CoreError>>()?;

    let grid = build_grid(&rows);
    let info = TrialInfo {
        trial_name: trial.name,
        club_name: trial.club_name,
    };
    Ok(Html(render_document(&info, &grid)))
}

/// Roster listing payload for the interactive selector.
#[derive(Debug, Serialize)]
pub struct TrialRoster {
    pub days: Vec<DaySchedule>,
    /// Selection ids registered within the last 24 hours, for highlighting.
    pub recently_added: Vec<DbId>,
}

/// GET /api/v1/trials/{trial_id}/selections
///
/// The trial's full roster grouped day -> class -> round, with classes in
/// canonical blueprint order. The interactive selector renders from this.
pub async fn trial_roster(
    State(state): State<AppState>,
    Path(trial_id): Path<DbId>,
) -> AppResult<Json<DataResponse<TrialRoster>>> {
    let details = SelectionRepo::list_detail_for_trial(&state.pool, trial_id).await?;
    let rows: Vec<RosterRow> = details
        .into_iter()
        .map(|d| d.into_roster_row())
        .collect::<Result<_, CoreError>>()?;

    let now = Utc::now();
    let recently_added = rows
        .iter()
        .filter(|r| is_recently_added(r.created_at, now))
        .map(|r| r.selection_id)
        .collect();

    Ok(Json(DataResponse {
        data: TrialRoster {
            days: group_rows(&rows),
            recently_added,
        },
    }))
}
