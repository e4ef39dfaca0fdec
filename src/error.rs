// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Every failure leaves the process as `{"error": "<code>"}` with a fixed
//! status. Causes are logged where they are observed, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Why a request carrying (or lacking) a session was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedReason {
    /// No session cookie on a refresh request.
    NoSession,
    /// The refresh cycle could not complete.
    RefreshFailed,
    /// No usable session for a data call.
    Unauthorized,
}

impl UnauthorizedReason {
    pub fn code(self) -> &'static str {
        match self {
            UnauthorizedReason::NoSession => "no_session",
            UnauthorizedReason::RefreshFailed => "refresh_failed",
            UnauthorizedReason::Unauthorized => "unauthorized",
        }
    }
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing authorization code")]
    MissingCode,

    #[error("Authorization code exchange failed")]
    AuthenticationFailed,

    #[error("Unauthorized: {}", .0.code())]
    Unauthorized(UnauthorizedReason),

    #[error("Playlist creation failed")]
    CreateFailed,
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::MissingCode => (StatusCode::BAD_REQUEST, "missing_code"),
            AppError::AuthenticationFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, "authentication_failed")
            }
            AppError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason.code()),
            AppError::CreateFailed => (StatusCode::BAD_REQUEST, "create_failed"),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
