pub mod achievements;
pub mod actions;
pub mod auth;
pub mod calculator;
pub mod health;
pub mod questions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
///
/// /actions/daily                 merged daily list (GET)
/// /actions                       create action (POST)
/// /actions/{id}                  completion toggle (PUT), delete/dismiss (DELETE)
/// /actions/{id}/track            convert suggestion to tracked action (POST)
///
/// /questions/{id}/vote           cast/toggle/flip a vote (POST)
///
/// /achievements                  catalog with earned/progress state (GET)
///
/// /calculator/track              bump usage counter, reconcile (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/actions", actions::router())
        .nest("/questions", questions::router())
        .nest("/achievements", achievements::router())
        .nest("/calculator", calculator::router())
}
