//! Eco-action entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use verda_core::types::{DayStamp, DbId, Timestamp};

/// A row from the `actions` table.
///
/// Either user-authored (`suggested = false`, no `date_assigned`) or assigned
/// by the daily suggestion batch (`suggested = true`, `date_assigned` set).
/// `dismissed` is meaningful only for suggestions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Action {
    pub id: DbId,
    pub user_id: DbId,
    pub text: String,
    pub category: String,
    pub completed: bool,
    pub suggested: bool,
    pub date_assigned: Option<DayStamp>,
    pub dismissed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the completion toggle.
#[derive(Debug, Deserialize)]
pub struct UpdateActionCompletion {
    pub completed: bool,
}

/// One entry of a suggestion batch insert (text/category copied from the
/// catalog definition at assignment time).
#[derive(Debug, Clone)]
pub struct NewSuggestion {
    pub text: String,
    pub category: String,
}
