//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::services::text_generation::GenerationError;
use crate::store::StoreError;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Validation Errors**: missing or mistyped request fields
/// - **Resource Errors**: requested recipe not found
/// - **Upstream Errors**: record store or text generation failed
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String names what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// Requested recipe does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Recipe not found")]
    RecipeNotFound,

    /// Record store unreachable, erroring or returning malformed data.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Text generation call failed.
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidRequest` → 400 Bad Request
/// - `RecipeNotFound` → 404 Not Found
/// - `Store`, `Generation` → 500 Internal Server Error (details logged, not returned)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::RecipeNotFound => {
                (StatusCode::NOT_FOUND, "recipe_not_found", self.to_string())
            }
            AppError::Store(_) | AppError::Generation(_) => {
                tracing::error!(error = %self, "upstream failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
