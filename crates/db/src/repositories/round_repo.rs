//! Repository for the `rounds` table.

use ringside_core::types::DbId;
use sqlx::PgPool;

use crate::models::round::{CreateRound, Round, UpdateRound};

/// Column list for rounds queries.
const COLUMNS: &str = "id, class_id, round_number, judge_name, discipline, games_subclass, created_at";

/// Provides CRUD operations for rounds.
pub struct RoundRepo;

impl RoundRepo {
    /// Insert a new round, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRound) -> Result<Round, sqlx::Error> {
        let query = format!(
            "INSERT INTO rounds (class_id, round_number, judge_name, discipline, games_subclass)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Round>(&query)
            .bind(input.class_id)
            .bind(input.round_number)
            .bind(&input.judge_name)
            .bind(&input.discipline)
            .bind(&input.games_subclass)
            .fetch_one(pool)
            .await
    }

    /// Find a round by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Round>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rounds WHERE id = $1");
        sqlx::query_as::<_, Round>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a class's rounds by round number ascending.
    pub async fn list_for_class(pool: &PgPool, class_id: DbId) -> Result<Vec<Round>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rounds WHERE class_id = $1 ORDER BY round_number ASC"
        );
        sqlx::query_as::<_, Round>(&query)
            .bind(class_id)
            .fetch_all(pool)
            .await
    }

    /// Patch a round's judge or games subclass.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRound,
    ) -> Result<Option<Round>, sqlx::Error> {
        let query = format!(
            "UPDATE rounds SET
                judge_name = COALESCE($2, judge_name),
                games_subclass = COALESCE($3, games_subclass)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Round>(&query)
            .bind(id)
            .bind(&input.judge_name)
            .bind(&input.games_subclass)
            .fetch_optional(pool)
            .await
    }
}
