//! Handlers for batch score saving and CSV export.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use ringside_core::error::CoreError;
use ringside_core::running_order::{export_scores_csv, ScoredRow};
use ringside_core::scoring::{validate_judge_assigned, Discipline, SaveReport, ScoreDraft};
use ringside_core::types::DbId;
use ringside_db::models::score::UpsertScore;
use ringside_db::repositories::{ClassRepo, ScoreRepo, SelectionRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// One score record within a batch save: a selection id plus the draft
/// fields accumulated client-side.
#[derive(Debug, Deserialize)]
pub struct ScoreRecordInput {
    pub selection_id: DbId,
    #[serde(flatten)]
    pub draft: ScoreDraft,
}

/// Request body for a batch save.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveScoresRequest {
    #[validate(length(min = 1))]
    pub scored_by: String,
    pub scores: Vec<ScoreRecordInput>,
}

/// POST /api/v1/classes/{class_id}/scores/save
///
/// Persists every populated draft in the batch, one upsert per record.
/// Judge assignment is validated up front and blocks the whole save;
/// per-record failures (validation or persistence) land in the report
/// without aborting the rest of the batch, and nothing already written is
/// rolled back.
pub async fn save_all(
    State(state): State<AppState>,
    Path(class_id): Path<DbId>,
    Json(input): Json<SaveScoresRequest>,
) -> AppResult<Json<SaveReport>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    ClassRepo::find_by_id(&state.pool, class_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id: class_id,
        }))?;

    let details = SelectionRepo::list_detail_for_class(&state.pool, class_id).await?;
    let by_selection: HashMap<DbId, _> = details
        .into_iter()
        .map(|d| (d.selection_id, d))
        .collect();

    // Judge assignment blocks the save before any write is issued.
    for record in &input.scores {
        if let Some(detail) = by_selection.get(&record.selection_id) {
            validate_judge_assigned(detail.judge_name.as_deref())?;
        }
    }

    let mut report = SaveReport::default();
    for record in &input.scores {
        let Some(detail) = by_selection.get(&record.selection_id) else {
            report.record_err(record.selection_id, "Selection is not in this class");
            continue;
        };
        if !record.draft.is_populated() {
            continue;
        }

        let discipline = match Discipline::from_str_value(&detail.discipline) {
            Ok(d) => d,
            Err(e) => {
                report.record_err(record.selection_id, e.to_string());
                continue;
            }
        };

        let mut draft = record.draft.clone();
        draft.normalize_for_round(discipline);
        if let Err(e) = draft.validate_for_round(discipline, detail.games_subclass.as_deref()) {
            report.record_err(record.selection_id, e.to_string());
            continue;
        }

        let upsert = UpsertScore::from_draft(record.selection_id, &draft, &input.scored_by);
        match ScoreRepo::upsert(&state.pool, &upsert).await {
            Ok(_) => report.record_ok(),
            Err(e) => {
                tracing::warn!(selection_id = record.selection_id, error = %e, "Score upsert failed");
                report.record_err(record.selection_id, e.to_string());
            }
        }
    }

    Ok(Json(report))
}

/// GET /api/v1/classes/{class_id}/scores/export
///
/// CSV attachment with the fixed column layout. Result values come from
/// the same derivation rule the print grid uses.
pub async fn export_csv(
    State(state): State<AppState>,
    Path(class_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ClassRepo::find_by_id(&state.pool, class_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id: class_id,
        }))?;

    let details = SelectionRepo::list_detail_for_class(&state.pool, class_id).await?;
    let scores = ScoreRepo::list_for_class(&state.pool, class_id).await?;

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

    let csv = export_scores_csv(&rows);
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"class-{class_id}-scores.csv\""),
        ),
    ];
    Ok((headers, csv))
}
