//! Vote ledger entity model.

use serde::Serialize;
use sqlx::FromRow;
use verda_core::types::{DbId, Timestamp};

/// A row from the `votes` ledger: one per (user, question) pair, value is
/// +1 or -1. Absence of a row is the "no vote" state.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vote {
    pub id: DbId,
    pub user_id: DbId,
    pub question_id: DbId,
    pub value: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
