//! Community question entity model.

use serde::Serialize;
use sqlx::FromRow;
use verda_core::types::{DbId, Timestamp};

/// A row from the `questions` table.
///
/// `upvotes`/`downvotes` are cached aggregates over the votes ledger; at all
/// times `upvotes - downvotes` equals the sum of ledger values for the
/// question.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub body: String,
    pub upvotes: i32,
    pub downvotes: i32,
    pub created_at: Timestamp,
}

/// Post-mutation counter snapshot returned to vote callers.
#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct VoteCounts {
    pub upvotes: i32,
    pub downvotes: i32,
}
