//! # HTTP Errors
//!
//! Maps auth and store errors to JSON `{ "error", "code" }` responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use super::config::ConfigError;
use crate::auth::AuthError;
use crate::edge_config::ConfigSourceError;
use crate::store::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not valid JSON for the target type
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Authentication or authorization failed
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Store rejected or failed the operation. Storage failures are
    /// reported as "Failed to {action}" without internal detail.
    #[error("{}", store_message(.action, .source))]
    Store {
        action: String,
        source: StoreError,
    },
}

fn store_message(action: &str, source: &StoreError) -> String {
    match source {
        StoreError::Storage(_) => format!("Failed to {}", action),
        other => other.to_string(),
    }
}

impl ApiError {
    /// Wrap a store error with the action that failed ("create project")
    pub fn store(action: impl Into<String>, source: StoreError) -> Self {
        ApiError::Store {
            action: action.into(),
            source,
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            ApiError::InvalidBody(_) => 400,
            ApiError::Auth(err) => err.status_code(),
            ApiError::Store { source, .. } => source.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            match &self {
                ApiError::Store { action, source } => error!(%action, error = %source, "store failure"),
                other => error!(error = %other, "request failed"),
            }
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

/// Errors raised while assembling or starting the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to open store: {0}")]
    Store(#[from] StoreError),

    #[error("failed to prepare admin account: {0}")]
    Auth(#[from] AuthError),

    #[error("failed to set up config source: {0}")]
    ConfigSource(#[from] ConfigSourceError),

    #[error("invalid listen address {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidBody("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AuthError::AuthenticationRequired).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::Forbidden).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::store("get project", StoreError::NotFound("project")).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_storage_failure_message_is_generic() {
        let err = ApiError::store(
            "create project",
            StoreError::Storage("disk full at /var/data".to_string()),
        );
        let body = ErrorResponse::from(&err);
        assert_eq!(body.error, "Failed to create project");
        assert_eq!(body.code, 500);
    }

    #[test]
    fn test_validation_message_is_passed_through() {
        let err = ApiError::store(
            "create skill",
            StoreError::Invalid {
                field: "level",
                reason: "must be between 1 and 10".to_string(),
            },
        );
        assert_eq!(err.to_string(), "Invalid level: must be between 1 and 10");
    }
}
