//! Score entity model and DTOs.

use ringside_core::entry_status::EntryStatus;
use ringside_core::error::CoreError;
use ringside_core::scoring::{ScentResult, ScoreDraft};
use ringside_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `scores` table. At most one live record per selection,
/// plus an optional reset-round variant flagged by `is_reset_round`.
///
/// `entry_status` is the snapshot captured at scoring time, independent of
/// the selection's live status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Score {
    pub id: DbId,
    pub selection_id: DbId,
    pub is_reset_round: bool,
    pub scent1: Option<String>,
    pub scent2: Option<String>,
    pub scent3: Option<String>,
    pub scent4: Option<String>,
    pub time_seconds: Option<f64>,
    pub numerical_score: Option<i32>,
    pub fault1: Option<i32>,
    pub pass_fail: Option<String>,
    pub judge_notes: Option<String>,
    pub entry_status: Option<String>,
    pub scored_by: Option<String>,
    pub scored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Score {
    /// Convert back to the core draft shape, parsing stored enum strings.
    pub fn to_draft(&self) -> Result<ScoreDraft, CoreError> {
        let scent = |value: &Option<String>| -> Result<Option<ScentResult>, CoreError> {
            value
                .as_deref()
                .map(ScentResult::from_str_value)
                .transpose()
        };
        Ok(ScoreDraft {
            scent1: scent(&self.scent1)?,
            scent2: scent(&self.scent2)?,
            scent3: scent(&self.scent3)?,
            scent4: scent(&self.scent4)?,
            time_seconds: self.time_seconds,
            numerical_score: self.numerical_score,
            fault1: self.fault1,
            pass_fail: self.pass_fail.clone(),
            judge_notes: self.judge_notes.clone(),
            entry_status: self
                .entry_status
                .as_deref()
                .map(EntryStatus::from_str_value)
                .transpose()?,
        })
    }
}

/// DTO for inserting or replacing a score record.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertScore {
    pub selection_id: DbId,
    pub is_reset_round: bool,
    pub scent1: Option<String>,
    pub scent2: Option<String>,
    pub scent3: Option<String>,
    pub scent4: Option<String>,
    pub time_seconds: Option<f64>,
    pub numerical_score: Option<i32>,
    pub fault1: Option<i32>,
    pub pass_fail: Option<String>,
    pub judge_notes: Option<String>,
    pub entry_status: Option<String>,
    pub scored_by: Option<String>,
}

impl UpsertScore {
    /// Build an upsert record from a core draft, stamping `scored_by`.
    pub fn from_draft(selection_id: DbId, draft: &ScoreDraft, scored_by: &str) -> Self {
        let scent = |v: Option<ScentResult>| v.map(|s| s.as_str().to_string());
        Self {
            selection_id,
            is_reset_round: false,
            scent1: scent(draft.scent1),
            scent2: scent(draft.scent2),
            scent3: scent(draft.scent3),
            scent4: scent(draft.scent4),
            time_seconds: draft.time_seconds,
            numerical_score: draft.numerical_score,
            fault1: draft.fault1,
            pass_fail: draft.pass_fail.clone(),
            judge_notes: draft.judge_notes.clone(),
            entry_status: draft.entry_status.map(|s| s.as_str().to_string()),
            scored_by: Some(scored_by.to_string()),
        }
    }
}
