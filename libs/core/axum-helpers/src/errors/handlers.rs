use super::ErrorResponse;
use axum::{http::StatusCode, response::IntoResponse, Json};

/// Fallback handler for unmatched routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "not_found".to_string(),
            message: "The requested resource was not found".to_string(),
            details: None,
        }),
    )
}
