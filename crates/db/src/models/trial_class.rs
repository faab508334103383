//! Class entity model and DTOs.

use ringside_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `classes` table. `class_type` drives the discipline of
/// the class's rounds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrialClass {
    pub id: DbId,
    pub day_id: DbId,
    pub name: String,
    pub class_type: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new class.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrialClass {
    pub day_id: DbId,
    pub name: String,
    pub class_type: String,
}
