//! Integration tests for suggestion batch persistence and the assignment
//! idempotency marker.

mod common;

use chrono::NaiveDate;
use verda_db::models::action::NewSuggestion;
use verda_db::repositories::ActionRepo;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date")
}

fn batch(texts: &[&str]) -> Vec<NewSuggestion> {
    texts
        .iter()
        .map(|t| NewSuggestion {
            text: (*t).to_string(),
            category: "test".to_string(),
        })
        .collect()
}

#[tokio::test]
async fn batch_insert_marks_day_assigned() {
    let Some(pool) = common::setup_pool().await else { return };
    let user = common::create_user(&pool, "assignee").await;

    assert!(!ActionRepo::batch_exists(&pool, user.id, day())
        .await
        .expect("query failed"));

    let rows = ActionRepo::insert_suggestion_batch(
        &pool,
        user.id,
        day(),
        &batch(&["walk to work", "meatless monday", "cold wash"]),
    )
    .await
    .expect("batch insert failed");

    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.suggested && !r.dismissed));
    assert!(rows.iter().all(|r| r.date_assigned == Some(day())));
    assert!(ActionRepo::batch_exists(&pool, user.id, day())
        .await
        .expect("query failed"));
}

#[tokio::test]
async fn empty_batch_still_marks_day_assigned() {
    let Some(pool) = common::setup_pool().await else { return };
    let user = common::create_user(&pool, "exhausted").await;

    let rows = ActionRepo::insert_suggestion_batch(&pool, user.id, day(), &[])
        .await
        .expect("empty batch insert failed");
    assert!(rows.is_empty());

    // The attempt is what counts as assigned, not the row count.
    assert!(ActionRepo::batch_exists(&pool, user.id, day())
        .await
        .expect("query failed"));
}

#[tokio::test]
async fn second_batch_for_same_day_is_rejected_atomically() {
    let Some(pool) = common::setup_pool().await else { return };
    let user = common::create_user(&pool, "doubler").await;

    ActionRepo::insert_suggestion_batch(&pool, user.id, day(), &batch(&["first"]))
        .await
        .expect("first batch failed");

    let err = ActionRepo::insert_suggestion_batch(&pool, user.id, day(), &batch(&["second"]))
        .await
        .expect_err("second batch should hit the unique marker");
    match err {
        sqlx::Error::Database(db_err) => assert_eq!(db_err.code().as_deref(), Some("23505")),
        other => panic!("expected unique violation, got {other:?}"),
    }

    // The losing batch rolled back whole: no stray rows.
    let rows = ActionRepo::suggestions_for_day(&pool, user.id, day())
        .await
        .expect("query failed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text, "first");
}

#[tokio::test]
async fn dismissed_suggestions_drop_out_of_the_day_list() {
    let Some(pool) = common::setup_pool().await else { return };
    let user = common::create_user(&pool, "dismisser").await;

    let rows =
        ActionRepo::insert_suggestion_batch(&pool, user.id, day(), &batch(&["keep", "drop"]))
            .await
            .expect("batch insert failed");
    let dropped = rows.iter().find(|r| r.text == "drop").expect("row missing");

    assert!(ActionRepo::dismiss(&pool, dropped.id)
        .await
        .expect("dismiss failed"));

    let remaining = ActionRepo::suggestions_for_day(&pool, user.id, day())
        .await
        .expect("query failed");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].text, "keep");

    // The day still counts as assigned; dismissal is soft.
    assert!(ActionRepo::batch_exists(&pool, user.id, day())
        .await
        .expect("query failed"));
}

#[tokio::test]
async fn delete_refuses_suggestions_and_dismiss_refuses_tracked_actions() {
    let Some(pool) = common::setup_pool().await else { return };
    let user = common::create_user(&pool, "mixed").await;

    let rows = ActionRepo::insert_suggestion_batch(&pool, user.id, day(), &batch(&["suggested"]))
        .await
        .expect("batch insert failed");
    let tracked = ActionRepo::create(&pool, user.id, "user authored", "test")
        .await
        .expect("create failed");

    // Wrong verb for each kind is a no-op.
    assert!(!ActionRepo::delete(&pool, rows[0].id).await.expect("query failed"));
    assert!(!ActionRepo::dismiss(&pool, tracked.id).await.expect("query failed"));

    // Right verb works.
    assert!(ActionRepo::dismiss(&pool, rows[0].id).await.expect("query failed"));
    assert!(ActionRepo::delete(&pool, tracked.id).await.expect("query failed"));
}

#[tokio::test]
async fn completed_count_ignores_suggestions() {
    let Some(pool) = common::setup_pool().await else { return };
    let user = common::create_user(&pool, "counter").await;

    let tracked = ActionRepo::create(&pool, user.id, "tracked", "test")
        .await
        .expect("create failed");
    ActionRepo::set_completed(&pool, tracked.id, true)
        .await
        .expect("update failed");

    let rows = ActionRepo::insert_suggestion_batch(&pool, user.id, day(), &batch(&["suggested"]))
        .await
        .expect("batch insert failed");
    ActionRepo::set_completed(&pool, rows[0].id, true)
        .await
        .expect("update failed");

    let count = ActionRepo::count_completed_tracked(&pool, user.id)
        .await
        .expect("query failed");
    assert_eq!(count, 1);
}
