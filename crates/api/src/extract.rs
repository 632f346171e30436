//! Request extractors whose rejections use the API error envelope.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with rejections (missing fields, wrong types, bad syntax,
/// missing content type) reported as `VALIDATION_ERROR` JSON instead of
/// axum's plain-text body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
