//! Handlers for the `/actions` resource: the daily list, completion
//! toggles, deletion/dismissal, and suggestion tracking.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;
use verda_core::error::CoreError;
use verda_core::types::DbId;
use verda_db::models::action::{Action, UpdateActionCompletion};
use verda_db::repositories::ActionRepo;

use crate::engine::{achievements, suggestions};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /actions`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateActionRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,
}

/// GET /api/v1/actions/daily
///
/// The merged daily list: today's suggestions (assigned on first call of the
/// day), today's tracked actions, and older tracked actions still incomplete.
pub async fn daily_list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let today = Utc::now().date_naive();
    let items =
        suggestions::daily_list(&state.pool, &state.catalog, auth.user_id, today).await?;

    Ok(Json(serde_json::json!({ "data": items })))
}

/// POST /api/v1/actions
///
/// Create a user-authored (non-suggested) action.
pub async fn create_action(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateActionRequest>,
) -> AppResult<Json<serde_json::Value>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let action =
        ActionRepo::create(&state.pool, auth.user_id, &input.text, &input.category).await?;

    Ok(Json(serde_json::json!({ "data": action })))
}

/// PUT /api/v1/actions/{id}
///
/// Toggle completion. On the incomplete -> complete transition, run the
/// achievement engine (threshold sweep, then text criteria) and return any
/// new awards alongside the updated action.
pub async fn update_completion(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(action_id): Path<DbId>,
    Json(input): Json<UpdateActionCompletion>,
) -> AppResult<Json<serde_json::Value>> {
    let existing = find_owned(&state, action_id, auth.user_id).await?;

    let updated = ActionRepo::set_completed(&state.pool, action_id, input.completed)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Action",
            id: action_id,
        }))?;

    // The completion is committed at this point; award checks are best
    // effort and must not fail the request.
    let awarded = if !existing.completed && updated.completed {
        achievements::on_completion(&state.pool, &state.catalog, auth.user_id, &updated.text)
            .await
    } else {
        Vec::new()
    };

    Ok(Json(serde_json::json!({
        "data": {
            "action": updated,
            "awarded_achievements": awarded,
        }
    })))
}

/// DELETE /api/v1/actions/{id}
///
/// Suggested actions are soft-dismissed (the row stays so the day still
/// counts as assigned); user-authored actions are hard-deleted.
pub async fn delete_action(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(action_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let existing = find_owned(&state, action_id, auth.user_id).await?;

    if existing.suggested {
        ActionRepo::dismiss(&state.pool, action_id).await?;
        Ok(Json(serde_json::json!({ "data": { "dismissed": true } })))
    } else {
        ActionRepo::delete(&state.pool, action_id).await?;
        Ok(Json(serde_json::json!({ "data": { "deleted": true } })))
    }
}

/// POST /api/v1/actions/{id}/track
///
/// Convert a suggestion into a tracked user action (copy then dismiss).
pub async fn track_suggestion(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(action_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let existing = find_owned(&state, action_id, auth.user_id).await?;

    if !existing.suggested {
        return Err(AppError::Core(CoreError::Validation(
            "only suggestions can be tracked".into(),
        )));
    }

    let tracked = suggestions::track_suggestion(&state.pool, auth.user_id, &existing).await?;

    Ok(Json(serde_json::json!({ "data": tracked })))
}

/// Load an action and enforce that the authenticated user owns it.
async fn find_owned(state: &AppState, action_id: DbId, user_id: DbId) -> AppResult<Action> {
    let action = ActionRepo::find_by_id(&state.pool, action_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Action",
            id: action_id,
        }))?;

    if action.user_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "action belongs to another user".into(),
        )));
    }

    Ok(action)
}
