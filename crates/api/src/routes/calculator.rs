//! Route definitions for calculator usage tracking.

use axum::routing::post;
use axum::Router;

use crate::handlers::calculator;
use crate::state::AppState;

/// Routes mounted at `/calculator`.
///
/// ```text
/// POST   /track   -> track_usage
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/track", post(calculator::track_usage))
}
