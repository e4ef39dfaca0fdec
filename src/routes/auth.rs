// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spotify OAuth authentication routes.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result, UnauthorizedReason};
use crate::middleware::cookies::clear_session_cookie;
use crate::middleware::session::{issue_session, read_session, SessionError};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", get(login))
        .route("/auth/callback", get(callback))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
}

/// Body of successful refresh and logout responses.
#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// `302 Found` to `location`.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Start OAuth flow - redirect to Spotify authorization.
async fn login(State(state): State<Arc<AppState>>) -> Response {
    tracing::info!(
        client_id = %state.config.client.client_id,
        "Starting OAuth flow, redirecting to Spotify"
    );

    found(&state.spotify_auth.authorization_url())
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange code for tokens, create session.
async fn callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Response)> {
    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        if let Some(error) = params.error {
            tracing::warn!(error = %error, "OAuth error from Spotify");
        }
        return Err(AppError::MissingCode);
    };

    tracing::info!("Exchanging authorization code for tokens");

    let grant = state
        .spotify_auth
        .exchange_code(&code)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Authorization code exchange failed");
            AppError::AuthenticationFailed
        })?;

    // exchange_code guarantees a refresh token
    let refresh_token = grant.refresh_token.unwrap_or_default();

    let cookie = issue_session(&state, &grant.access_token, &refresh_token, grant.expires_in)
        .map_err(|e| {
            tracing::error!(error = %e, "Session credential creation failed");
            AppError::AuthenticationFailed
        })?;

    tracing::info!(expires_in = grant.expires_in, "OAuth successful, session issued");

    Ok((jar.add(cookie), found(&state.config.frontend_url)))
}

/// Re-issue the session credential with a freshly refreshed access token.
///
/// The current credential must still verify; an expired one is rejected
/// the same way as a forged one.
async fn refresh(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<OkResponse>)> {
    let session = read_session(&jar, &state).map_err(|err| match err {
        SessionError::Missing => AppError::Unauthorized(UnauthorizedReason::NoSession),
        SessionError::Invalid => {
            tracing::debug!("Refresh attempted with invalid session credential");
            AppError::Unauthorized(UnauthorizedReason::RefreshFailed)
        }
    })?;

    let grant = state
        .spotify_auth
        .refresh(&session.refresh_token)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Token refresh failed");
            AppError::Unauthorized(UnauthorizedReason::RefreshFailed)
        })?;

    // Spotify does not always rotate the refresh token
    let refresh_token = grant.refresh_token.unwrap_or(session.refresh_token);

    let cookie = issue_session(&state, &grant.access_token, &refresh_token, grant.expires_in)
        .map_err(|e| {
            tracing::error!(error = %e, "Session credential creation failed");
            AppError::Unauthorized(UnauthorizedReason::RefreshFailed)
        })?;

    tracing::info!(expires_in = grant.expires_in, "Session refreshed");

    Ok((
        jar.add(cookie),
        Json(OkResponse {
            ok: true,
            message: None,
        }),
    ))
}

/// Logout - clear the session cookie. Always succeeds.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Json<OkResponse>) {
    (
        jar.add(clear_session_cookie(&state.config)),
        Json(OkResponse {
            ok: true,
            message: Some("Logged out successfully"),
        }),
    )
}
