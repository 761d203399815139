//! Achievement engine: catalog reconciliation and text-criterion checks.
//!
//! Awards are additive only. The already-awarded filter plus the unique
//! constraint on (user, achievement name) make every path at-most-once; a
//! statistic dropping back below a threshold never revokes an award.
//!
//! A failed award insert is logged and skipped rather than propagated: a
//! lost achievement notification is acceptable collateral, the primary
//! mutation that triggered the check is not allowed to fail because of it.

use std::collections::HashSet;

use verda_core::achievement::{self, Progress, UserStats};
use verda_core::catalog::{AchievementDef, Catalog};
use verda_core::types::{DbId, Timestamp};
use verda_db::models::achievement::AwardedAchievement;
use verda_db::repositories::{AchievementRepo, ActionRepo, UserRepo};
use verda_db::DbPool;

use crate::error::AppResult;

/// Load the statistics snapshot the threshold criteria read.
pub async fn load_stats(pool: &DbPool, user_id: DbId) -> AppResult<UserStats> {
    let completed_actions = ActionRepo::count_completed_tracked(pool, user_id).await?;
    let calculator_uses = UserRepo::find_by_id(pool, user_id)
        .await?
        .map_or(0, |u| i64::from(u.calculator_uses));
    Ok(UserStats {
        completed_actions,
        calculator_uses,
    })
}

/// Contract A: sweep the catalog's threshold criteria against the user's
/// current statistics and award whatever is newly satisfied.
///
/// Safe to call repeatedly: definitions already earned are filtered out
/// before evaluation, so nothing is ever double-awarded.
pub async fn reconcile(
    pool: &DbPool,
    catalog: &Catalog,
    user_id: DbId,
) -> AppResult<Vec<AwardedAchievement>> {
    let stats = load_stats(pool, user_id).await?;
    let earned = earned_set(pool, user_id).await?;
    let newly = achievement::newly_satisfied(&catalog.achievements, &earned, &stats);
    Ok(award_all(pool, user_id, &newly).await)
}

/// Contract B: evaluate `actionText` criteria against the text of a
/// just-completed action.
///
/// Re-loads the earned set so awards made by a [`reconcile`] call earlier in
/// the same request are seen and not duplicated.
pub async fn check_action_text_criteria(
    pool: &DbPool,
    catalog: &Catalog,
    user_id: DbId,
    completed_text: &str,
) -> AppResult<Vec<AwardedAchievement>> {
    let earned = earned_set(pool, user_id).await?;
    let newly = achievement::newly_satisfied_by_text(&catalog.achievements, &earned, completed_text);
    Ok(award_all(pool, user_id, &newly).await)
}

/// Run both contracts for a just-completed action.
///
/// Infallible by contract: the completion that triggered the check has
/// already committed, so an engine failure here (stats load, earned-set
/// read, award insert) is logged and yields no awards rather than turning
/// a persisted completion into an error response.
pub async fn on_completion(
    pool: &DbPool,
    catalog: &Catalog,
    user_id: DbId,
    completed_text: &str,
) -> Vec<AwardedAchievement> {
    let mut awarded = match reconcile(pool, catalog, user_id).await {
        Ok(awards) => awards,
        Err(err) => {
            tracing::error!(user_id, error = %err, "achievement sweep failed after completion");
            return Vec::new();
        }
    };
    match check_action_text_criteria(pool, catalog, user_id, completed_text).await {
        Ok(awards) => awarded.extend(awards),
        Err(err) => {
            tracing::error!(user_id, error = %err, "text criterion check failed after completion");
        }
    }
    awarded
}

async fn earned_set(pool: &DbPool, user_id: DbId) -> AppResult<HashSet<String>> {
    Ok(AchievementRepo::earned_names(pool, user_id)
        .await?
        .into_iter()
        .collect())
}

/// Insert one award row per definition. Per-award failures (including losing
/// a race to a concurrent insert) are logged and skipped.
async fn award_all(
    pool: &DbPool,
    user_id: DbId,
    defs: &[&AchievementDef],
) -> Vec<AwardedAchievement> {
    let mut awarded = Vec::new();
    for def in defs {
        match AchievementRepo::award(pool, user_id, def.name).await {
            Ok(Some(row)) => {
                tracing::info!(user_id, achievement = def.name, "achievement awarded");
                awarded.push(row);
            }
            Ok(None) => {
                tracing::debug!(user_id, achievement = def.name, "already awarded, skipping");
            }
            Err(err) => {
                tracing::error!(
                    user_id,
                    achievement = def.name,
                    error = %err,
                    "failed to persist achievement award"
                );
            }
        }
    }
    awarded
}

/// One catalog entry merged with the user's earned/progress state, for the
/// achievements overview endpoint.
#[derive(Debug, serde::Serialize)]
pub struct AchievementStatus {
    pub name: &'static str,
    pub description: &'static str,
    pub badge: &'static str,
    pub tier: Option<&'static str>,
    pub earned: bool,
    pub earned_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
}

/// Read-only overview: the full catalog with per-user earned flags and
/// clamped progress (earned threshold achievements always report 100%).
pub async fn overview(
    pool: &DbPool,
    catalog: &Catalog,
    user_id: DbId,
) -> AppResult<Vec<AchievementStatus>> {
    let stats = load_stats(pool, user_id).await?;
    let awards = AchievementRepo::list_for_user(pool, user_id).await?;

    Ok(catalog
        .achievements
        .iter()
        .map(|def| {
            let earned_at = awards
                .iter()
                .find(|a| a.achievement_name == def.name)
                .map(|a| a.earned_at);
            let earned = earned_at.is_some();
            AchievementStatus {
                name: def.name,
                description: def.description,
                badge: def.badge,
                tier: def.tier,
                earned,
                earned_at,
                progress: achievement::progress(def, &stats, earned),
            }
        })
        .collect())
}
