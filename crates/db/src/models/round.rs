//! Round entity model and DTOs.

use ringside_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `rounds` table: one judged instance of a class.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Round {
    pub id: DbId,
    pub class_id: DbId,
    pub round_number: i32,
    pub judge_name: Option<String>,
    pub discipline: String,
    pub games_subclass: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new round.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRound {
    pub class_id: DbId,
    pub round_number: i32,
    pub judge_name: Option<String>,
    pub discipline: String,
    pub games_subclass: Option<String>,
}

/// DTO for updating an existing round. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRound {
    pub judge_name: Option<String>,
    pub games_subclass: Option<String>,
}
