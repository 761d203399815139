//! Handler for the achievements overview.

use axum::extract::State;
use axum::Json;

use crate::engine::achievements;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/achievements
///
/// The full catalog merged with the authenticated user's earned state and
/// progress toward unearned threshold achievements.
pub async fn list_achievements(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let statuses = achievements::overview(&state.pool, &state.catalog, auth.user_id).await?;

    Ok(Json(serde_json::json!({ "data": statuses })))
}
