//! Daily suggestion assignment service.
//!
//! Assignment is keyed by (user, UTC calendar day) and happens lazily on the
//! first read each day; there is no scheduler. The `suggestion_batches`
//! marker row makes the assignment idempotent: once a batch exists for the
//! day, reads return the persisted rows (minus dismissed ones) and never
//! recompute, even when the batch assigned zero suggestions.

use rand::rng;
use verda_core::catalog::Catalog;
use verda_core::suggestion::{self, daily_rank};
use verda_core::types::{DayStamp, DbId};
use verda_db::models::action::{Action, NewSuggestion};
use verda_db::repositories::ActionRepo;
use verda_db::DbPool;

use crate::error::AppResult;

/// Today's suggestion set for a user, assigning it first if this is the
/// first call of the day.
///
/// Returns the non-dismissed suggestion rows for `day`, oldest first.
pub async fn get_daily_suggestions(
    pool: &DbPool,
    catalog: &Catalog,
    user_id: DbId,
    day: DayStamp,
) -> AppResult<Vec<Action>> {
    if !ActionRepo::batch_exists(pool, user_id, day).await? {
        assign_for_day(pool, catalog, user_id, day).await?;
    }
    Ok(ActionRepo::suggestions_for_day(pool, user_id, day).await?)
}

/// The merged daily list: active suggestions, then incomplete tracked
/// actions, then tracked actions completed today; ties broken by creation
/// time ascending.
pub async fn daily_list(
    pool: &DbPool,
    catalog: &Catalog,
    user_id: DbId,
    day: DayStamp,
) -> AppResult<Vec<Action>> {
    let mut items = get_daily_suggestions(pool, catalog, user_id, day).await?;
    items.extend(ActionRepo::active_for_day(pool, user_id, day).await?);
    items.sort_by(|a, b| {
        daily_rank(a.suggested, a.completed)
            .cmp(&daily_rank(b.suggested, b.completed))
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.cmp(&b.id))
    });
    Ok(items)
}

/// Compute and persist the day's assignment.
///
/// Candidates are the catalog minus anything already on the user's active
/// list (case-insensitive text match); three are picked from a uniform
/// shuffle. The batch marker and the rows commit in one transaction, so a
/// failed write leaves nothing behind and the next call retries the whole
/// assignment. Losing an assignment race to a concurrent request is fine:
/// the winner's rows are what subsequent reads return.
async fn assign_for_day(
    pool: &DbPool,
    catalog: &Catalog,
    user_id: DbId,
    day: DayStamp,
) -> AppResult<()> {
    let active = ActionRepo::active_for_day(pool, user_id, day).await?;
    let active_texts: Vec<String> = active.into_iter().map(|a| a.text).collect();

    let candidates = suggestion::candidates(&catalog.suggestions, &active_texts);
    let picked = suggestion::pick(candidates, &mut rng());
    let batch: Vec<NewSuggestion> = picked
        .into_iter()
        .map(|def| NewSuggestion {
            text: def.text.to_string(),
            category: def.category.to_string(),
        })
        .collect();

    match ActionRepo::insert_suggestion_batch(pool, user_id, day, &batch).await {
        Ok(assigned) => {
            tracing::info!(
                user_id,
                %day,
                count = assigned.len(),
                "assigned daily suggestions"
            );
            Ok(())
        }
        Err(err) if is_unique_violation(&err) => {
            // A concurrent request won the assignment; its batch stands.
            tracing::debug!(user_id, %day, "daily assignment lost race, using existing batch");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Convert a suggestion into a tracked user action.
///
/// Two steps, deliberately non-transactional: create the tracked copy, then
/// dismiss the original suggestion. If the dismissal fails the duplicate is
/// tolerated -- the tracked action was still usefully created -- so the
/// failure is logged rather than surfaced.
pub async fn track_suggestion(
    pool: &DbPool,
    user_id: DbId,
    suggestion_row: &Action,
) -> AppResult<Action> {
    let tracked =
        ActionRepo::create(pool, user_id, &suggestion_row.text, &suggestion_row.category).await?;

    if let Err(err) = ActionRepo::dismiss(pool, suggestion_row.id).await {
        tracing::warn!(
            action_id = suggestion_row.id,
            error = %err,
            "failed to dismiss suggestion after tracking; duplicate tolerated"
        );
    }

    Ok(tracked)
}

/// Whether a sqlx error is a PostgreSQL unique constraint violation (23505).
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"))
}
