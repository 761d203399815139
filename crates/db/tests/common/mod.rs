//! Shared setup for repository integration tests.
//!
//! These tests run against the PostgreSQL instance named by
//! `TEST_DATABASE_URL` (falling back to `DATABASE_URL`) and skip themselves
//! when neither is set.

use sqlx::PgPool;
use verda_db::models::question::Question;
use verda_db::models::user::User;
use verda_db::repositories::{QuestionRepo, UserRepo};

/// Connect to the test database and apply migrations, or `None` when no
/// database is configured (the calling test should return early).
pub async fn setup_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL"))
    else {
        eprintln!("TEST_DATABASE_URL not set; skipping database test");
        return None;
    };

    let pool = verda_db::create_pool(&url).await.expect("connect failed");
    verda_db::run_migrations(&pool).await.expect("migrations failed");
    Some(pool)
}

/// Create a throwaway user with a unique email.
pub async fn create_user(pool: &PgPool, tag: &str) -> User {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    let email = format!("{tag}-{nanos}@test.invalid");
    UserRepo::create(pool, &email, tag, "not-a-real-hash")
        .await
        .expect("user insert failed")
}

/// Create a question authored by the given user.
pub async fn create_question(pool: &PgPool, author_id: i64, title: &str) -> Question {
    QuestionRepo::create(pool, author_id, title, "")
        .await
        .expect("question insert failed")
}
