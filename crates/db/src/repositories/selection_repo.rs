//! Repository for the `selections` table.

use ringside_core::sequencing::PositionAssignment;
use ringside_core::types::DbId;
use sqlx::PgPool;

use crate::models::selection::{Selection, SelectionDetail, UpdateSelection};

/// Column list for selections queries.
const COLUMNS: &str = "id, entry_id, round_id, running_position, entry_type, \
    entry_status, created_at, updated_at";

/// Column list for the denormalized roster view.
const DETAIL_COLUMNS: &str = "s.id AS selection_id, e.handler_name, e.dog_name, \
    s.entry_type, s.entry_status, s.running_position, \
    r.id AS round_id, r.round_number, r.judge_name, r.discipline, r.games_subclass, \
    c.id AS class_id, c.name AS class_name, d.date AS class_date, s.created_at";

/// Join clause shared by the detail queries.
const DETAIL_JOINS: &str = "FROM selections s \
    JOIN entries e ON e.id = s.entry_id \
    JOIN rounds r ON r.id = s.round_id \
    JOIN classes c ON c.id = r.class_id \
    LEFT JOIN days d ON d.id = c.day_id";

/// Provides CRUD and sequencing operations for selections.
pub struct SelectionRepo;

impl SelectionRepo {
    /// Insert a new selection at the given running position.
    pub async fn create(
        pool: &PgPool,
        entry_id: DbId,
        round_id: DbId,
        running_position: i32,
        entry_type: &str,
    ) -> Result<Selection, sqlx::Error> {
        let query = format!(
            "INSERT INTO selections (entry_id, round_id, running_position, entry_type)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Selection>(&query)
            .bind(entry_id)
            .bind(round_id)
            .bind(running_position)
            .bind(entry_type)
            .fetch_one(pool)
            .await
    }

    /// Find a selection by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Selection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM selections WHERE id = $1");
        sqlx::query_as::<_, Selection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a round's selections in running-position order.
    pub async fn list_for_round(
        pool: &PgPool,
        round_id: DbId,
    ) -> Result<Vec<Selection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM selections
             WHERE round_id = $1
             ORDER BY running_position ASC"
        );
        sqlx::query_as::<_, Selection>(&query)
            .bind(round_id)
            .fetch_all(pool)
            .await
    }

    /// Current running positions within a round, unordered.
    pub async fn positions_for_round(
        pool: &PgPool,
        round_id: DbId,
    ) -> Result<Vec<i32>, sqlx::Error> {
        let rows: Vec<(i32,)> =
            sqlx::query_as("SELECT running_position FROM selections WHERE round_id = $1")
                .bind(round_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(p,)| p).collect())
    }

    /// Apply a full renumbering batch in one transaction.
    ///
    /// The round's position unique constraint is deferred, so intermediate
    /// duplicates inside the transaction are fine; either the whole batch
    /// lands or none of it does.
    pub async fn batch_update_positions(
        pool: &PgPool,
        assignments: &[PositionAssignment],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for assignment in assignments {
            sqlx::query(
                "UPDATE selections SET running_position = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(assignment.selection_id)
            .bind(assignment.running_position)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        tracing::debug!(count = assignments.len(), "Applied position batch");
        Ok(())
    }

    /// Patch a selection's status or entry type. Never touches positions.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSelection,
    ) -> Result<Option<Selection>, sqlx::Error> {
        let query = format!(
            "UPDATE selections SET
                entry_status = COALESCE($2, entry_status),
                entry_type = COALESCE($3, entry_type),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Selection>(&query)
            .bind(id)
            .bind(&input.entry_status)
            .bind(&input.entry_type)
            .fetch_optional(pool)
            .await
    }

    /// Denormalized roster rows for a whole trial.
    pub async fn list_detail_for_trial(
        pool: &PgPool,
        trial_id: DbId,
    ) -> Result<Vec<SelectionDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS}
             WHERE e.trial_id = $1
             ORDER BY d.date ASC, c.id ASC, r.round_number ASC, s.running_position ASC"
        );
        sqlx::query_as::<_, SelectionDetail>(&query)
            .bind(trial_id)
            .fetch_all(pool)
            .await
    }

    /// Denormalized roster rows for one day.
    pub async fn list_detail_for_day(
        pool: &PgPool,
        day_id: DbId,
    ) -> Result<Vec<SelectionDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS}
             WHERE c.day_id = $1
             ORDER BY c.id ASC, r.round_number ASC, s.running_position ASC"
        );
        sqlx::query_as::<_, SelectionDetail>(&query)
            .bind(day_id)
            .fetch_all(pool)
            .await
    }

    /// Denormalized roster rows for one class.
    pub async fn list_detail_for_class(
        pool: &PgPool,
        class_id: DbId,
    ) -> Result<Vec<SelectionDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS}
             WHERE c.id = $1
             ORDER BY r.round_number ASC, s.running_position ASC"
        );
        sqlx::query_as::<_, SelectionDetail>(&query)
            .bind(class_id)
            .fetch_all(pool)
            .await
    }
}
