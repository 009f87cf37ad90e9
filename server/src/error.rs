//! HTTP error mapping. Every variant renders as `{"message": "..."}`.

use articles_core::ArticleError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed client input (400).
    BadRequest(String),
    /// No article with the requested id (404).
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<ArticleError> for ApiError {
    fn from(err: ArticleError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
