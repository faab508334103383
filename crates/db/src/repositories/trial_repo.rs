//! Repository for the `trials` table.

use ringside_core::types::DbId;
use sqlx::PgPool;

use crate::models::trial::{CreateTrial, Trial};

/// Column list for trials queries.
const COLUMNS: &str = "id, name, club_name, created_at";

/// Provides CRUD operations for trials.
pub struct TrialRepo;

impl TrialRepo {
    /// Insert a new trial, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTrial) -> Result<Trial, sqlx::Error> {
        let query = format!(
            "INSERT INTO trials (name, club_name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trial>(&query)
            .bind(&input.name)
            .bind(&input.club_name)
            .fetch_one(pool)
            .await
    }

    /// Find a trial by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Trial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trials WHERE id = $1");
        sqlx::query_as::<_, Trial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all trials, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Trial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trials ORDER BY created_at DESC");
        sqlx::query_as::<_, Trial>(&query).fetch_all(pool).await
    }
}
