//! Repository for the `classes` table.

use ringside_core::types::DbId;
use sqlx::PgPool;

use crate::models::trial_class::{CreateTrialClass, TrialClass};

/// Column list for classes queries.
const COLUMNS: &str = "id, day_id, name, class_type, created_at";

/// Provides CRUD operations for classes.
pub struct ClassRepo;

impl ClassRepo {
    /// Insert a new class, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTrialClass) -> Result<TrialClass, sqlx::Error> {
        let query = format!(
            "INSERT INTO classes (day_id, name, class_type) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrialClass>(&query)
            .bind(input.day_id)
            .bind(&input.name)
            .bind(&input.class_type)
            .fetch_one(pool)
            .await
    }

    /// Find a class by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TrialClass>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM classes WHERE id = $1");
        sqlx::query_as::<_, TrialClass>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the classes of a day in creation order.
    pub async fn list_for_day(pool: &PgPool, day_id: DbId) -> Result<Vec<TrialClass>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM classes WHERE day_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, TrialClass>(&query)
            .bind(day_id)
            .fetch_all(pool)
            .await
    }
}
