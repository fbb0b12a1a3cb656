//! Error-to-HTTP response mapping.
//!
//! Handlers return [`ApiError`], which wraps the application-wide
//! [`AppError`] so that `?` works on every core, auth and service call.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hirevault_core::error::{AppError, ErrorKind};

/// Standard error response body.
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    /// Error code string.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// An [`AppError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError {
    inner: AppError,
    bad_input: bool,
}

impl ApiError {
    /// Marks a validation failure as caused by the request itself (400)
    /// rather than by stored data (422).
    pub fn bad_request(err: AppError) -> Self {
        Self {
            inner: err,
            bad_input: true,
        }
    }

    /// The wrapped error.
    pub fn inner(&self) -> &AppError {
        &self.inner
    }

    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        match self.inner.kind {
            ErrorKind::InvalidCredentials
            | ErrorKind::TokenExpiredOrRevoked
            | ErrorKind::InvalidOrExpiredRefreshToken => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation if self.bad_input => StatusCode::BAD_REQUEST,
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self {
            inner: err,
            bad_input: false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (code, message) = if status.is_server_error() {
            tracing::error!(
                kind = %self.inner.kind,
                error = %self.inner.message,
                source = ?self.inner.source,
                "Internal server error"
            );
            ("INTERNAL_ERROR".to_string(), "An internal error occurred".to_string())
        } else {
            (self.inner.kind.to_string(), self.inner.message)
        };

        let body = ApiErrorResponse {
            error: code,
            message,
            details: None,
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
