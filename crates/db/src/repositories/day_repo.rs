//! Repository for the `days` table.

use ringside_core::types::DbId;
use sqlx::PgPool;

use crate::models::day::{CreateDay, Day};

/// Column list for days queries.
const COLUMNS: &str = "id, trial_id, date, created_at";

/// Provides CRUD operations for trial days.
pub struct DayRepo;

impl DayRepo {
    /// Insert a new day, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDay) -> Result<Day, sqlx::Error> {
        let query = format!(
            "INSERT INTO days (trial_id, date) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Day>(&query)
            .bind(input.trial_id)
            .bind(input.date)
            .fetch_one(pool)
            .await
    }

    /// Find a day by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Day>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM days WHERE id = $1");
        sqlx::query_as::<_, Day>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the days of a trial in date order.
    pub async fn list_for_trial(pool: &PgPool, trial_id: DbId) -> Result<Vec<Day>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM days WHERE trial_id = $1 ORDER BY date ASC");
        sqlx::query_as::<_, Day>(&query)
            .bind(trial_id)
            .fetch_all(pool)
            .await
    }
}
