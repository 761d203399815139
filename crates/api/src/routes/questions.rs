//! Route definitions for question voting.
//!
//! Only the vote endpoint is exposed; question CRUD is owned by the wider
//! community service and is not part of this API.

use axum::routing::post;
use axum::Router;

use crate::handlers::votes;
use crate::state::AppState;

/// Routes mounted at `/questions`.
///
/// ```text
/// POST   /{id}/vote   -> cast_vote
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/vote", post(votes::cast_vote))
}
