//! Awarded achievement entity model.

use serde::Serialize;
use sqlx::FromRow;
use verda_core::types::{DbId, Timestamp};

/// A row from the `awarded_achievements` table.
///
/// Unique per (user, achievement name): an achievement is earned at most once
/// per user, ever.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AwardedAchievement {
    pub id: DbId,
    pub user_id: DbId,
    pub achievement_name: String,
    pub earned_at: Timestamp,
}
