//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No login-state cookie on the callback
    #[error("Login state cookie is missing")]
    LoginStateMissing,

    /// Login-state cookie exists but has expired
    #[error("Login attempt has expired")]
    LoginStateExpired,

    /// Callback state does not match the stored CSRF state
    #[error("OAuth state mismatch")]
    StateMismatch,

    /// The provider reported an error (user denied consent, etc.)
    #[error("Provider rejected the login: {0}")]
    ProviderDenied(String),

    /// Token exchange or userinfo fetch failed
    #[error("Code exchange failed: {0}")]
    ExchangeFailed(String),

    /// Session cookie missing, tampered, or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::LoginStateMissing
            | AuthError::LoginStateExpired
            | AuthError::StateMismatch => StatusCode::BAD_REQUEST,
            AuthError::ProviderDenied(_) => StatusCode::UNAUTHORIZED,
            AuthError::ExchangeFailed(_) => StatusCode::BAD_GATEWAY,
            AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::LoginStateMissing
            | AuthError::LoginStateExpired
            | AuthError::StateMismatch => ErrorKind::BadRequest,
            AuthError::ProviderDenied(_) | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::ExchangeFailed(_) => ErrorKind::BadGateway,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::ExchangeFailed(msg) => {
                tracing::error!(message = %msg, "OAuth code exchange failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::StateMismatch => {
                tracing::warn!("OAuth state mismatch detected");
            }
            AuthError::ProviderDenied(reason) => {
                tracing::warn!(reason = %reason, "Provider rejected login");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
