//! Repository for the `questions` table.
//!
//! Question CRUD proper is routine and lives outside the engine; this repo
//! carries just what voting and tests need.

use sqlx::PgPool;
use verda_core::types::DbId;

use crate::models::question::Question;

/// Column list for `questions` queries.
const COLUMNS: &str = "id, author_id, title, body, upvotes, downvotes, created_at";

/// Provides lookups for community questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a question with zeroed counters.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        title: &str,
        body: &str,
    ) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (author_id, title, body) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(author_id)
            .bind(title)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// Find a question by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
