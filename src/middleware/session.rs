// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session cookie authentication middleware.

use crate::credential::{CredentialError, SessionTokens};
use crate::error::{AppError, UnauthorizedReason};
use crate::middleware::cookies::session_cookie;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::sync::Arc;

/// Why no session could be read from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// No session cookie.
    Missing,
    /// Cookie present but forged, malformed or expired.
    Invalid,
}

/// Read and verify the session cookie.
pub fn read_session(jar: &CookieJar, state: &AppState) -> Result<SessionTokens, SessionError> {
    let cookie = jar
        .get(&state.config.cookie_name)
        .filter(|c| !c.value().is_empty())
        .ok_or(SessionError::Missing)?;

    state
        .codec
        .decode(cookie.value())
        .map_err(|_| SessionError::Invalid)
}

/// Wrap fresh provider tokens in a credential and its cookie.
pub fn issue_session(
    state: &AppState,
    access_token: &str,
    refresh_token: &str,
    expires_in: u64,
) -> Result<Cookie<'static>, CredentialError> {
    let credential = state
        .codec
        .encode(access_token, refresh_token, expires_in)?;

    Ok(session_cookie(&state.config, credential, expires_in))
}

/// Middleware that requires a valid session credential.
///
/// Inserts the decoded [`SessionTokens`] as a request extension.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let tokens = read_session(&jar, &state).map_err(|err| {
        tracing::debug!(reason = ?err, path = %request.uri().path(), "Rejected session");
        AppError::Unauthorized(UnauthorizedReason::Unauthorized)
    })?;

    request.extensions_mut().insert(tokens);

    Ok(next.run(request).await)
}
