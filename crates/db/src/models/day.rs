//! Trial day entity model and DTOs.

use chrono::NaiveDate;
use ringside_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `days` table: one calendar date within a trial.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Day {
    pub id: DbId,
    pub trial_id: DbId,
    pub date: NaiveDate,
    pub created_at: Timestamp,
}

/// DTO for creating a new day.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDay {
    pub trial_id: DbId,
    pub date: NaiveDate,
}
