//! HTTP error surface.
//!
//! Everything a handler can fail with is either a domain [`CoreError`] or a
//! [`sqlx::Error`] from the persistence layer; both render as
//! `{"error": <message>, "code": <machine code>}` JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use verda_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::Core(core) => core_parts(core),
            Self::Database(err) => database_parts(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}

fn core_parts(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "internal error");
            internal()
        }
    }
}

/// Map persistence failures onto the API surface.
///
/// `RowNotFound` is a plain 404. A unique violation (PostgreSQL 23505) on
/// one of this schema's constraints is a 409 with a message naming what
/// conflicted; anything else is logged and sanitized to a 500.
fn database_parts(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            match db_err.constraint().and_then(conflict_message) {
                Some(message) => (StatusCode::CONFLICT, "CONFLICT", message.to_string()),
                None => {
                    tracing::error!(error = %db_err, "unique violation outside the known constraints");
                    internal()
                }
            }
        }
        other => {
            tracing::error!(error = %other, "database error");
            internal()
        }
    }
}

/// Conflict copy for the unique constraints the schema defines.
///
/// The vote, batch and award constraints conflict only under races the
/// repositories absorb internally, so in practice only the email constraint
/// reaches clients.
fn conflict_message(constraint: &str) -> Option<&'static str> {
    match constraint {
        "uq_users_email" => Some("An account with this email already exists"),
        "uq_votes_user_question" => Some("A vote for this question is already recorded"),
        "uq_suggestion_batches_user_day" => Some("Today's suggestions are already assigned"),
        "uq_awarded_achievements_user_name" => Some("Achievement already awarded"),
        _ => None,
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_and_code(err: AppError) -> (StatusCode, &'static str) {
        let (status, code, _) = err.parts();
        (status, code)
    }

    #[test]
    fn core_errors_map_to_their_status() {
        assert_eq!(
            status_and_code(CoreError::NotFound { entity: "Action", id: 9 }.into()),
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        );
        assert_eq!(
            status_and_code(CoreError::Validation("bad input".into()).into()),
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        );
        assert_eq!(
            status_and_code(CoreError::Unauthorized("no token".into()).into()),
            (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
        );
        assert_eq!(
            status_and_code(CoreError::Forbidden("not yours".into()).into()),
            (StatusCode::FORBIDDEN, "FORBIDDEN")
        );
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let (status, _, message) =
            AppError::from(CoreError::Internal("connection string for db".into())).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "An internal error occurred");
    }

    #[test]
    fn missing_rows_map_to_not_found() {
        assert_eq!(
            status_and_code(sqlx::Error::RowNotFound.into()),
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        );
    }

    #[test]
    fn every_schema_constraint_has_conflict_copy() {
        for constraint in [
            "uq_users_email",
            "uq_votes_user_question",
            "uq_suggestion_batches_user_day",
            "uq_awarded_achievements_user_name",
        ] {
            assert!(conflict_message(constraint).is_some(), "{constraint}");
        }
        assert!(conflict_message("actions_pkey").is_none());
    }
}
