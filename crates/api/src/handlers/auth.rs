//! Handlers for `/auth` (registration and login).

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use verda_core::error::CoreError;
use verda_db::models::user::UserResponse;
use verda_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "display_name must not be empty"))]
    pub display_name: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/v1/auth/register
///
/// Create an account and return an access token. A duplicate email maps to
/// 409 via the `uq_users_email` constraint.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<Json<serde_json::Value>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::Core(CoreError::Internal(format!("password hashing failed: {e}"))))?;

    let user = UserRepo::create(&state.pool, &input.email, &input.display_name, &password_hash)
        .await?;
    let token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::Core(CoreError::Internal(format!("token generation failed: {e}"))))?;

    Ok(Json(serde_json::json!({
        "data": {
            "user": UserResponse::from(user),
            "token": token,
        }
    })))
}

/// POST /api/v1/auth/login
///
/// Verify credentials and return an access token. Unknown email and wrong
/// password produce the same 401 so the response does not leak which
/// accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid)?;

    let matches = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::Core(CoreError::Internal(format!("password verification failed: {e}"))))?;
    if !matches {
        return Err(invalid());
    }

    let token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::Core(CoreError::Internal(format!("token generation failed: {e}"))))?;

    Ok(Json(serde_json::json!({
        "data": {
            "user": UserResponse::from(user),
            "token": token,
        }
    })))
}
