//! Route definitions for the `/actions` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::actions;
use crate::state::AppState;

/// Routes mounted at `/actions`.
///
/// ```text
/// GET    /daily        -> daily_list (assigns today's suggestions on first call)
/// POST   /             -> create_action
/// PUT    /{id}         -> update_completion
/// DELETE /{id}         -> delete_action (delete or dismiss)
/// POST   /{id}/track   -> track_suggestion
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/daily", get(actions::daily_list))
        .route("/", post(actions::create_action))
        .route(
            "/{id}",
            put(actions::update_completion).delete(actions::delete_action),
        )
        .route("/{id}/track", post(actions::track_suggestion))
}
