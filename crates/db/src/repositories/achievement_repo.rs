//! Repository for the `awarded_achievements` table.

use sqlx::PgPool;
use verda_core::types::DbId;

use crate::models::achievement::AwardedAchievement;

/// Column list for `awarded_achievements` queries.
const COLUMNS: &str = "id, user_id, achievement_name, earned_at";

/// Provides award inserts and earned-set lookups.
pub struct AchievementRepo;

impl AchievementRepo {
    /// Award an achievement to a user, at most once ever.
    ///
    /// Returns `None` when the user already holds the achievement: the
    /// `ON CONFLICT DO NOTHING` on the (user, name) unique constraint makes
    /// concurrent reconciles race-safe without a second round trip.
    pub async fn award(
        pool: &PgPool,
        user_id: DbId,
        achievement_name: &str,
    ) -> Result<Option<AwardedAchievement>, sqlx::Error> {
        let query = format!(
            "INSERT INTO awarded_achievements (user_id, achievement_name) \
             VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_awarded_achievements_user_name DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AwardedAchievement>(&query)
            .bind(user_id)
            .bind(achievement_name)
            .fetch_optional(pool)
            .await
    }

    /// Names of all achievements the user has earned.
    pub async fn earned_names(pool: &PgPool, user_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT achievement_name FROM awarded_achievements WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// All award rows for a user, oldest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AwardedAchievement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM awarded_achievements \
             WHERE user_id = $1 \
             ORDER BY earned_at"
        );
        sqlx::query_as::<_, AwardedAchievement>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
