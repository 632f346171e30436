//! `AppError` to HTTP response mapping, checked without a server.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use mealmax_api::error::AppError;
use mealmax_core::error::CoreError;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Core(CoreError::NotFound {
        entity: "Meal",
        id: 42,
    }))
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Meal with ID 42 not found");
}

#[tokio::test]
async fn deleted_returns_404_with_distinct_code() {
    let (status, json) = error_to_response(AppError::Core(CoreError::Deleted {
        entity: "Meal",
        id: 7,
    }))
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "DELETED");
    assert_eq!(json["error"], "Meal with ID 7 has been deleted");
}

#[tokio::test]
async fn validation_returns_400() {
    let (status, json) =
        error_to_response(CoreError::Validation("Invalid sort_by parameter: x".into()).into())
            .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Invalid sort_by parameter: x");
}

#[tokio::test]
async fn conflict_and_capacity_return_409() {
    let (status, json) = error_to_response(CoreError::Conflict("dup".into()).into()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");

    let (status, json) = error_to_response(CoreError::Capacity("full".into()).into()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CAPACITY");
}

#[tokio::test]
async fn precondition_returns_422() {
    let (status, json) = error_to_response(CoreError::Precondition("need two".into()).into()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "need two");
}

#[tokio::test]
async fn upstream_failures_map_to_gateway_statuses() {
    let (status, _) = error_to_response(CoreError::Runtime("down".into()).into()).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (status, json) = error_to_response(CoreError::Timeout("slow".into()).into()).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["code"], "TIMEOUT");
}

#[tokio::test]
async fn internal_error_message_is_sanitized() {
    let (status, json) =
        error_to_response(CoreError::Internal("connection string leaked".into()).into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn sqlx_pool_timeout_maps_to_504() {
    let (status, _) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn bad_request_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("nope".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "nope");
}
