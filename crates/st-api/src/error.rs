//! Error-to-response mapping at the API boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use st_store::ServiceError;

/// Errors a handler can surface to a client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested account does not exist.
    #[error("not found")]
    NotFound,
    /// The request named a username that cannot name state files.
    #[error("invalid username: {0}")]
    InvalidUsername(String),
    /// A directory or store failure the client cannot fix.
    #[error(transparent)]
    Service(ServiceError),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidUsername(e) => Self::InvalidUsername(e.to_string()),
            other => Self::Service(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Empty body, matching the original service's bare 404.
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::InvalidUsername(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            Self::Service(e) => {
                tracing::error!(error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal error" })),
                )
                    .into_response()
            }
        }
    }
}
