use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid user id: {0}")]
    InvalidId(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Attach operation context to a storage error.
    ///
    /// Validation and not-found errors already name their subject and pass
    /// through unchanged.
    pub fn context(self, operation: impl Into<String>) -> Self {
        match self {
            UserError::Storage(msg) => {
                UserError::Storage(format!("{}: {}", operation.into(), msg))
            }
            other => other,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            UserError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("User {} not found", id),
            ),
            UserError::InvalidId(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_id", msg.clone())
            }
            UserError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            UserError::Storage(msg) => {
                // Detail goes to the log, not to the client
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        (
            status,
            Json(json!({
                "error": {
                    "type": error_type,
                    "message": message
                }
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_wraps_storage_errors_only() {
        let err = UserError::Storage("connection reset".to_string())
            .context("could not update the user with id 42");
        assert_eq!(
            err.to_string(),
            "Storage error: could not update the user with id 42: connection reset"
        );

        let id = Uuid::new_v4();
        let err = UserError::NotFound(id).context("could not update");
        assert!(matches!(err, UserError::NotFound(found) if found == id));
    }

    #[test]
    fn test_status_code_mapping() {
        let cases = [
            (
                UserError::NotFound(Uuid::new_v4()).into_response(),
                StatusCode::NOT_FOUND,
            ),
            (
                UserError::InvalidId("bad".to_string()).into_response(),
                StatusCode::BAD_REQUEST,
            ),
            (
                UserError::Validation("bad".to_string()).into_response(),
                StatusCode::BAD_REQUEST,
            ),
            (
                UserError::Storage("boom".to_string()).into_response(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (response, expected) in cases {
            assert_eq!(response.status(), expected);
        }
    }
}
