//! Repository for the `entries` table.

use ringside_core::types::DbId;
use sqlx::PgPool;

use crate::models::entry::{CreateEntry, Entry};

/// Column list for entries queries.
const COLUMNS: &str = "id, trial_id, handler_name, dog_name, created_at";

/// Provides CRUD operations for competitor entries.
pub struct EntryRepo;

impl EntryRepo {
    /// Insert a new entry, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEntry) -> Result<Entry, sqlx::Error> {
        let query = format!(
            "INSERT INTO entries (trial_id, handler_name, dog_name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(input.trial_id)
            .bind(&input.handler_name)
            .bind(&input.dog_name)
            .fetch_one(pool)
            .await
    }

    /// Find an entry by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entries WHERE id = $1");
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a trial's entries alphabetically by handler.
    pub async fn list_for_trial(pool: &PgPool, trial_id: DbId) -> Result<Vec<Entry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM entries WHERE trial_id = $1 ORDER BY handler_name ASC, dog_name ASC"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(trial_id)
            .fetch_all(pool)
            .await
    }
}
