//! Repository for the `votes` ledger and the question vote counters.
//!
//! The ledger write and the counter adjustment are one transaction; either
//! both commit or neither does. Counters move via single atomic
//! `upvotes = upvotes + $n` expressions, never read-modify-write.

use sqlx::PgPool;
use verda_core::types::DbId;
use verda_core::vote::{self, Direction, LedgerOp, VoteState};

use crate::models::question::VoteCounts;
use crate::models::vote::Vote;

/// Column list for `votes` queries.
const COLUMNS: &str = "id, user_id, question_id, value, created_at, updated_at";

/// Applies vote transitions to the ledger and question counters.
pub struct VoteRepo;

impl VoteRepo {
    /// Apply a vote intent for `(user, question)` and return the
    /// post-mutation counters read back from the question row.
    ///
    /// Locks the user's ledger row (if any) for the duration of the
    /// transaction so two concurrent submissions from the same user serialize
    /// into two well-formed transitions instead of corrupting the counters.
    ///
    /// Returns `sqlx::Error::RowNotFound` if the question does not exist.
    pub async fn apply_vote(
        pool: &PgPool,
        user_id: DbId,
        question_id: DbId,
        direction: Direction,
    ) -> Result<VoteCounts, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Existence check first: a vote against a missing question must fail
        // before any ledger write.
        sqlx::query_scalar::<_, DbId>("SELECT id FROM questions WHERE id = $1 FOR UPDATE")
            .bind(question_id)
            .fetch_one(&mut *tx)
            .await?;

        let current: Option<i16> = sqlx::query_scalar(
            "SELECT value FROM votes WHERE user_id = $1 AND question_id = $2 FOR UPDATE",
        )
        .bind(user_id)
        .bind(question_id)
        .fetch_optional(&mut *tx)
        .await?;

        let state = VoteState::from_ledger(current)
            .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;
        let transition = vote::apply(state, direction);

        match transition.ledger {
            LedgerOp::Insert(dir) => {
                sqlx::query(
                    "INSERT INTO votes (user_id, question_id, value) VALUES ($1, $2, $3)",
                )
                .bind(user_id)
                .bind(question_id)
                .bind(dir.value())
                .execute(&mut *tx)
                .await?;
            }
            LedgerOp::Update(dir) => {
                sqlx::query(
                    "UPDATE votes SET value = $3, updated_at = NOW() \
                     WHERE user_id = $1 AND question_id = $2",
                )
                .bind(user_id)
                .bind(question_id)
                .bind(dir.value())
                .execute(&mut *tx)
                .await?;
            }
            LedgerOp::Delete => {
                sqlx::query("DELETE FROM votes WHERE user_id = $1 AND question_id = $2")
                    .bind(user_id)
                    .bind(question_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        let counts = sqlx::query_as::<_, VoteCounts>(
            "UPDATE questions \
             SET upvotes = upvotes + $2, downvotes = downvotes + $3 \
             WHERE id = $1 \
             RETURNING upvotes, downvotes",
        )
        .bind(question_id)
        .bind(transition.delta.upvotes)
        .bind(transition.delta.downvotes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(counts)
    }

    /// The user's current ledger row for a question, if any.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        question_id: DbId,
    ) -> Result<Option<Vote>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM votes WHERE user_id = $1 AND question_id = $2");
        sqlx::query_as::<_, Vote>(&query)
            .bind(user_id)
            .bind(question_id)
            .fetch_optional(pool)
            .await
    }

    /// Sum of ledger values for a question. The counter consistency
    /// invariant is `upvotes - downvotes == ledger_sum`.
    pub async fn ledger_sum(pool: &PgPool, question_id: DbId) -> Result<i64, sqlx::Error> {
        let sum: Option<i64> =
            sqlx::query_scalar("SELECT SUM(value)::BIGINT FROM votes WHERE question_id = $1")
                .bind(question_id)
                .fetch_one(pool)
                .await?;
        Ok(sum.unwrap_or(0))
    }
}
