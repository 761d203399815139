//! Repository for the `actions` and `suggestion_batches` tables.

use sqlx::PgPool;
use verda_core::types::{DayStamp, DbId};

use crate::models::action::{Action, NewSuggestion};

/// Column list for `actions` queries.
const COLUMNS: &str = "id, user_id, text, category, completed, suggested, \
    date_assigned, dismissed, created_at, updated_at";

/// Provides CRUD operations for eco-actions and daily suggestion batches.
pub struct ActionRepo;

impl ActionRepo {
    /// Insert a user-authored (non-suggested) action.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        text: &str,
        category: &str,
    ) -> Result<Action, sqlx::Error> {
        let query = format!(
            "INSERT INTO actions (user_id, text, category) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(user_id)
            .bind(text)
            .bind(category)
            .fetch_one(pool)
            .await
    }

    /// Find an action by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Action>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actions WHERE id = $1");
        sqlx::query_as::<_, Action>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a suggestion batch has already been written for `(user, day)`.
    ///
    /// This is the assignment idempotency marker: it exists even when the
    /// batch assigned zero suggestions.
    pub async fn batch_exists(
        pool: &PgPool,
        user_id: DbId,
        day: DayStamp,
    ) -> Result<bool, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM suggestion_batches WHERE user_id = $1 AND day = $2",
        )
        .bind(user_id)
        .bind(day)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0) > 0)
    }

    /// Non-dismissed suggestion rows assigned to `(user, day)`.
    pub async fn suggestions_for_day(
        pool: &PgPool,
        user_id: DbId,
        day: DayStamp,
    ) -> Result<Vec<Action>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM actions \
             WHERE user_id = $1 AND suggested AND date_assigned = $2 AND NOT dismissed \
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(user_id)
            .bind(day)
            .fetch_all(pool)
            .await
    }

    /// The user's active non-suggested actions for a day: anything created on
    /// that day plus older ones still incomplete.
    pub async fn active_for_day(
        pool: &PgPool,
        user_id: DbId,
        day: DayStamp,
    ) -> Result<Vec<Action>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM actions \
             WHERE user_id = $1 AND NOT suggested \
               AND (NOT completed OR (created_at AT TIME ZONE 'UTC')::date = $2) \
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(user_id)
            .bind(day)
            .fetch_all(pool)
            .await
    }

    /// Persist a suggestion batch for `(user, day)` atomically: the batch
    /// marker and all assigned rows commit together, so a failed write leaves
    /// the day unassigned and the whole assignment retries on the next call.
    ///
    /// A concurrent assignment for the same (user, day) loses on the batch
    /// marker's unique constraint and the transaction rolls back; callers
    /// should then re-read the winner's rows.
    pub async fn insert_suggestion_batch(
        pool: &PgPool,
        user_id: DbId,
        day: DayStamp,
        batch: &[NewSuggestion],
    ) -> Result<Vec<Action>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("INSERT INTO suggestion_batches (user_id, day) VALUES ($1, $2)")
            .bind(user_id)
            .bind(day)
            .execute(&mut *tx)
            .await?;

        let insert_query = format!(
            "INSERT INTO actions (user_id, text, category, suggested, date_assigned) \
             VALUES ($1, $2, $3, TRUE, $4) \
             RETURNING {COLUMNS}"
        );
        let mut assigned = Vec::with_capacity(batch.len());
        for suggestion in batch {
            let row = sqlx::query_as::<_, Action>(&insert_query)
                .bind(user_id)
                .bind(&suggestion.text)
                .bind(&suggestion.category)
                .bind(day)
                .fetch_one(&mut *tx)
                .await?;
            assigned.push(row);
        }

        tx.commit().await?;
        Ok(assigned)
    }

    /// Set the completion flag, returning the updated row if it exists.
    pub async fn set_completed(
        pool: &PgPool,
        id: DbId,
        completed: bool,
    ) -> Result<Option<Action>, sqlx::Error> {
        let query = format!(
            "UPDATE actions SET completed = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(id)
            .bind(completed)
            .fetch_optional(pool)
            .await
    }

    /// Soft-dismiss a suggestion. The row stays in place so the day still
    /// counts as assigned; it just drops out of the returned list.
    pub async fn dismiss(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE actions SET dismissed = TRUE, updated_at = NOW() \
             WHERE id = $1 AND suggested",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a non-suggested action.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM actions WHERE id = $1 AND NOT suggested")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count of completed, non-suggested actions for a user (feeds the
    /// `actionCount` achievement criteria).
    pub async fn count_completed_tracked(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM actions \
             WHERE user_id = $1 AND completed AND NOT suggested",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
