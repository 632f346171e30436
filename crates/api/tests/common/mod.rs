#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use mealmax_api::config::ServerConfig;
use mealmax_api::router::build_app_router;
use mealmax_api::state::AppState;
use mealmax_battle::{BattleEngine, RandomOrgConfig};
use mealmax_core::random::FixedRandom;
use mealmax_db::{DbConfig, MealCatalog};
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// The database URL is never dialed; tests hand the router an existing pool.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database: DbConfig::new("postgres://unused"),
        random: RandomOrgConfig::default(),
    }
}

/// Build the full application router over `pool` with a draw of `0.1`, so the
/// higher-scoring combatant wins every battle.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_random(pool, 0.1)
}

/// Same as [`build_test_app`] but with a caller-chosen fixed draw.
///
/// The arena lives in the returned router's state; clone the router to send
/// several requests against the same staged combatants.
pub fn build_test_app_with_random(pool: PgPool, draw: f64) -> Router {
    let engine = BattleEngine::new(
        Arc::new(MealCatalog::new(pool.clone())),
        Arc::new(FixedRandom(draw)),
    );
    let config = test_config();
    let state = AppState::new(pool, config.clone(), engine);
    build_app_router(state, &config).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a meal through the API and return its id.
pub async fn create_meal(
    app: &Router,
    name: &str,
    cuisine: &str,
    price: f64,
    difficulty: &str,
) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/meals",
        serde_json::json!({
            "name": name,
            "cuisine": cuisine,
            "price": price,
            "difficulty": difficulty,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
