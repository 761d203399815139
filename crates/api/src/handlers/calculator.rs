//! Handler for footprint-calculator usage tracking.

use axum::extract::State;
use axum::Json;
use verda_core::error::CoreError;
use verda_db::repositories::UserRepo;

use crate::engine::achievements;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/calculator/track
///
/// Atomically bump the authenticated user's calculator usage counter, then
/// reconcile achievements so usage-threshold badges are awarded the moment
/// their threshold is crossed.
pub async fn track_usage(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let calculator_uses = UserRepo::increment_calculator_uses(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    // The increment is committed; a failed sweep loses at worst an award
    // notification, not the tracked usage.
    let awarded = match achievements::reconcile(&state.pool, &state.catalog, auth.user_id).await {
        Ok(awards) => awards,
        Err(err) => {
            tracing::error!(
                user_id = auth.user_id,
                error = %err,
                "achievement sweep failed after calculator increment"
            );
            Vec::new()
        }
    };

    Ok(Json(serde_json::json!({
        "data": {
            "calculator_uses": calculator_uses,
            "awarded_achievements": awarded,
        }
    })))
}
