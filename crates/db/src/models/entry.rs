//! Entry (competitor registration) model and DTOs.

use ringside_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `entries` table: a handler/dog pair registered to a trial.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Entry {
    pub id: DbId,
    pub trial_id: DbId,
    pub handler_name: String,
    pub dog_name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntry {
    pub trial_id: DbId,
    pub handler_name: String,
    pub dog_name: String,
}
