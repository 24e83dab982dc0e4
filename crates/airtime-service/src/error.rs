//! API error types and responses.
//!
//! Every error leaving a handler becomes a JSON body carrying `success` and
//! `message`; no raw fault ever reaches the caller. Provider failures are
//! not represented here: the handler composes those responses itself from
//! the normalized [`crate::provider::TopUpOutcome`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use airtime_store::StoreError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The recipient was absent or malformed.
    #[error("Invalid phone number")]
    InvalidInput,

    /// The number is already registered and permanently ineligible.
    #[error("This number already received airtime.")]
    AlreadyServed,

    /// The database schema is missing; the service was never set up.
    #[error("database not configured: {0}")]
    DatabaseNotConfigured(String),

    /// Anything unexpected.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, code) = match &self {
            Self::InvalidInput => (
                StatusCode::BAD_REQUEST,
                "Invalid phone number".to_string(),
                None,
            ),
            Self::AlreadyServed => (
                StatusCode::FORBIDDEN,
                "This number already received airtime.".to_string(),
                None,
            ),
            Self::DatabaseNotConfigured(detail) => {
                tracing::error!(error = %detail, "Database schema missing");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database is not configured; run the schema migrations.".to_string(),
                    Some("database_not_configured"),
                )
            }
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unknown error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            message,
            code,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SchemaMissing(detail) => Self::DatabaseNotConfigured(detail),
            other => Self::Internal(other.to_string()),
        }
    }
}
