//! Gate Error Types
//!
//! This module provides gate-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Gate-specific result type alias
pub type GateResult<T> = Result<T, GateError>;

/// Gate-specific error variants
#[derive(Debug, Error)]
pub enum GateError {
    /// Session not found, expired, or carried a bad cookie token
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Auth backend rejected the bearer token (401)
    #[error("Auth backend rejected the token")]
    TokenRejected,

    /// Token adoption failed for a non-auth reason
    #[error("Token adoption failed: {0}")]
    AdoptionFailed(String),

    /// Auth backend request failed at the transport level
    #[error("Auth backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GateError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GateError::SessionInvalid | GateError::TokenRejected => StatusCode::UNAUTHORIZED,
            GateError::AdoptionFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
            GateError::Http(e) if e.is_timeout() => StatusCode::REQUEST_TIMEOUT,
            GateError::Http(_) => StatusCode::SERVICE_UNAVAILABLE,
            GateError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GateError::SessionInvalid | GateError::TokenRejected => ErrorKind::Unauthorized,
            GateError::AdoptionFailed(_) => ErrorKind::ServiceUnavailable,
            GateError::Http(e) if e.is_timeout() => ErrorKind::RequestTimeout,
            GateError::Http(_) => ErrorKind::ServiceUnavailable,
            GateError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            GateError::Http(e) => {
                tracing::error!(error = %e, "Auth backend request failed");
            }
            GateError::Internal(msg) => {
                tracing::error!(message = %msg, "Gate internal error");
            }
            GateError::AdoptionFailed(msg) => {
                tracing::warn!(message = %msg, "Token adoption failed");
            }
            GateError::TokenRejected => {
                tracing::warn!("Auth backend rejected a bearer token");
            }
            GateError::SessionInvalid => {
                tracing::debug!("Session not found or expired");
            }
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for GateError {
    fn from(err: AppError) -> Self {
        GateError::Internal(err.to_string())
    }
}
