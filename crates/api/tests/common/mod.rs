//! Shared harness for API integration tests.
//!
//! These tests exercise the full router (middleware included) against the
//! PostgreSQL instance named by `TEST_DATABASE_URL` (falling back to
//! `DATABASE_URL`) and skip themselves when neither is set.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use verda_core::catalog::{AchievementDef, Catalog, Criterion, SuggestionDef};

use verda_api::auth::jwt::JwtConfig;
use verda_api::config::ServerConfig;
use verda_api::router::build_app_router;
use verda_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// A small catalog with low thresholds so tests cross them quickly.
pub fn test_catalog() -> Catalog {
    Catalog {
        suggestions: vec![
            SuggestionDef { text: "Walk to work", category: "transport" },
            SuggestionDef { text: "Meat-free lunch", category: "food" },
            SuggestionDef { text: "Cold wash", category: "energy" },
            SuggestionDef { text: "Refill a bottle", category: "waste" },
            SuggestionDef { text: "Lights off", category: "energy" },
        ],
        achievements: vec![
            AchievementDef {
                name: "Starter",
                description: "Complete 2 eco-actions",
                badge: "badge-starter",
                tier: Some("bronze"),
                criterion: Criterion::ActionCount { threshold: 2 },
            },
            AchievementDef {
                name: "Cyclist",
                description: "Complete a cycling action",
                badge: "badge-cyclist",
                tier: None,
                criterion: Criterion::ActionText { keywords: &["bike", "cycle"] },
            },
            AchievementDef {
                name: "Calculated",
                description: "Use the calculator once",
                badge: "badge-calc",
                tier: Some("bronze"),
                criterion: Criterion::CalculatorUsage { threshold: 1 },
            },
        ],
    }
}

/// Connect to the test database, run migrations, and build the full app
/// router with the substituted test catalog. Returns `None` when no database
/// is configured (the calling test should return early).
pub async fn build_test_app() -> Option<Router> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL"))
    else {
        eprintln!("TEST_DATABASE_URL not set; skipping database test");
        return None;
    };
    let pool = verda_db::create_pool(&url).await.expect("connect failed");
    verda_db::run_migrations(&pool).await.expect("migrations failed");

    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        catalog: Arc::new(test_catalog()),
    };
    Some(build_app_router(state, &config))
}

/// Register a fresh user through the API and return their bearer token.
pub async fn register_user(app: &Router, tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    let body = serde_json::json!({
        "email": format!("{tag}-{nanos}@test.invalid"),
        "display_name": tag,
        "password": "correct-horse-battery",
    });

    let response = send(app, post_json("/api/v1/auth/register", &body, None)).await;
    assert_eq!(response.0, StatusCode::OK);
    response.1["data"]["token"]
        .as_str()
        .expect("token missing")
        .to_string()
}

/// Build a JSON request with an optional bearer token.
pub fn post_json(
    uri: &str,
    body: &serde_json::Value,
    token: Option<&str>,
) -> Request<Body> {
    request_with_body("POST", uri, body, token)
}

pub fn put_json(uri: &str, body: &serde_json::Value, token: Option<&str>) -> Request<Body> {
    request_with_body("PUT", uri, body, token)
}

fn request_with_body(
    method: &str,
    uri: &str,
    body: &serde_json::Value,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request build failed")
}

/// Build a bodyless request (GET/DELETE/POST without payload).
pub fn bare(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request build failed")
}

/// Send a request through the router and decode the JSON response.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body read failed")
        .to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response was not JSON")
    };
    (status, json)
}
