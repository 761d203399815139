//! Handler for casting votes on community questions.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use verda_core::types::DbId;
use verda_core::vote::Direction;
use verda_db::repositories::VoteRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /questions/{id}/vote`.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    /// `+1` or `-1`. `0` is a display concept, not a valid mutation.
    pub value: i16,
}

/// POST /api/v1/questions/{id}/vote
///
/// Apply a vote intent: same direction again toggles the vote off, the
/// opposite direction flips it in one step. Returns the post-mutation
/// counters read back from the question row.
pub async fn cast_vote(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(question_id): Path<DbId>,
    Json(input): Json<VoteRequest>,
) -> AppResult<Json<serde_json::Value>> {
    // Validation before any store access.
    let direction = Direction::from_intent(input.value).map_err(AppError::Core)?;

    // A missing question surfaces as RowNotFound from the repository's
    // existence lock and classifies to 404.
    let counts = VoteRepo::apply_vote(&state.pool, auth.user_id, question_id, direction).await?;

    Ok(Json(serde_json::json!({
        "data": {
            "upvotes": counts.upvotes,
            "downvotes": counts.downvotes,
            "total_votes": counts.upvotes - counts.downvotes,
        }
    })))
}
