//! Repository for the `users` table.

use sqlx::PgPool;
use verda_core::types::DbId;

use crate::models::user::User;

/// Column list for `users` queries.
const COLUMNS: &str =
    "id, email, display_name, password_hash, calculator_uses, created_at, updated_at";

/// Provides CRUD operations for user accounts and their usage counters.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        display_name: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, display_name, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(display_name)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by their internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (login).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Atomically bump the footprint-calculator usage counter, returning the
    /// new value. A single UPDATE expression so concurrent bumps never lose
    /// increments.
    pub async fn increment_calculator_uses(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE users \
             SET calculator_uses = calculator_uses + 1, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING calculator_uses",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
