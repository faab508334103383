//! Trial entity model and DTOs.

use ringside_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `trials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Trial {
    pub id: DbId,
    pub name: String,
    pub club_name: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new trial.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrial {
    pub name: String,
    pub club_name: Option<String>,
}
