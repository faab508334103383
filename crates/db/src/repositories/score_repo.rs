//! Repository for the `scores` table.

use ringside_core::types::DbId;
use sqlx::PgPool;

use crate::models::score::{Score, UpsertScore};

/// Column list for scores queries.
const COLUMNS: &str = "id, selection_id, is_reset_round, scent1, scent2, scent3, scent4, \
    time_seconds, numerical_score, fault1, pass_fail, judge_notes, entry_status, \
    scored_by, scored_at, created_at, updated_at";

/// Provides upsert and query operations for scores.
pub struct ScoreRepo;

impl ScoreRepo {
    /// Insert or replace the score for a selection, stamping `scored_at`.
    pub async fn upsert(pool: &PgPool, input: &UpsertScore) -> Result<Score, sqlx::Error> {
        let query = format!(
            "INSERT INTO scores
                (selection_id, is_reset_round, scent1, scent2, scent3, scent4,
                 time_seconds, numerical_score, fault1, pass_fail, judge_notes,
                 entry_status, scored_by, scored_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW())
             ON CONFLICT (selection_id, is_reset_round) DO UPDATE SET
                scent1 = EXCLUDED.scent1,
                scent2 = EXCLUDED.scent2,
                scent3 = EXCLUDED.scent3,
                scent4 = EXCLUDED.scent4,
                time_seconds = EXCLUDED.time_seconds,
                numerical_score = EXCLUDED.numerical_score,
                fault1 = EXCLUDED.fault1,
                pass_fail = EXCLUDED.pass_fail,
                judge_notes = EXCLUDED.judge_notes,
                entry_status = EXCLUDED.entry_status,
                scored_by = EXCLUDED.scored_by,
                scored_at = NOW(),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Score>(&query)
            .bind(input.selection_id)
            .bind(input.is_reset_round)
            .bind(&input.scent1)
            .bind(&input.scent2)
            .bind(&input.scent3)
            .bind(&input.scent4)
            .bind(input.time_seconds)
            .bind(input.numerical_score)
            .bind(input.fault1)
            .bind(&input.pass_fail)
            .bind(&input.judge_notes)
            .bind(&input.entry_status)
            .bind(&input.scored_by)
            .fetch_one(pool)
            .await
    }

    /// Find the live (non-reset) score for a selection.
    pub async fn find_for_selection(
        pool: &PgPool,
        selection_id: DbId,
    ) -> Result<Option<Score>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scores
             WHERE selection_id = $1 AND is_reset_round = FALSE"
        );
        sqlx::query_as::<_, Score>(&query)
            .bind(selection_id)
            .fetch_optional(pool)
            .await
    }

    /// Live scores for every selection on a day, joined through classes.
    pub async fn list_for_day(pool: &PgPool, day_id: DbId) -> Result<Vec<Score>, sqlx::Error> {
        let query = "SELECT sc.id, sc.selection_id, sc.is_reset_round, sc.scent1, sc.scent2,
                    sc.scent3, sc.scent4, sc.time_seconds, sc.numerical_score, sc.fault1,
                    sc.pass_fail, sc.judge_notes, sc.entry_status, sc.scored_by,
                    sc.scored_at, sc.created_at, sc.updated_at
             FROM scores sc
             JOIN selections s ON s.id = sc.selection_id
             JOIN rounds r ON r.id = s.round_id
             JOIN classes c ON c.id = r.class_id
             WHERE c.day_id = $1 AND sc.is_reset_round = FALSE";
        sqlx::query_as::<_, Score>(query)
            .bind(day_id)
            .fetch_all(pool)
            .await
    }

    /// Live scores for every selection in a class, joined through rounds.
    pub async fn list_for_class(pool: &PgPool, class_id: DbId) -> Result<Vec<Score>, sqlx::Error> {
        let query = "SELECT sc.id, sc.selection_id, sc.is_reset_round, sc.scent1, sc.scent2,
                    sc.scent3, sc.scent4, sc.time_seconds, sc.numerical_score, sc.fault1,
                    sc.pass_fail, sc.judge_notes, sc.entry_status, sc.scored_by,
                    sc.scored_at, sc.created_at, sc.updated_at
             FROM scores sc
             JOIN selections s ON s.id = sc.selection_id
             JOIN rounds r ON r.id = s.round_id
             WHERE r.class_id = $1 AND sc.is_reset_round = FALSE";
        sqlx::query_as::<_, Score>(query)
            .bind(class_id)
            .fetch_all(pool)
            .await
    }
}
