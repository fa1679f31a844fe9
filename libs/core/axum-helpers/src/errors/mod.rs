mod handlers;

pub use handlers::not_found;

use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response body.
///
/// - `error`: machine-readable error identifier (e.g. "not_found")
/// - `message`: human-readable error message
/// - `details`: optional structured details (e.g. per-field validation errors)
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
