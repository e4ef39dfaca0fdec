// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes proxying the Spotify Web API for authenticated users.

use crate::credential::SessionTokens;
use crate::error::{AppError, Result, UnauthorizedReason};
use crate::middleware::session::read_session;
use crate::services::spotify::{
    NewPlaylist, Page, ProxyError, DEFAULT_INCLUDE_GROUPS, DEFAULT_LIMIT, DEFAULT_OFFSET,
    DEFAULT_TIME_RANGE,
};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Read-only API routes (require a session).
/// The session middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/top-artists", get(get_top_artists))
        .route("/api/artists/{id}", get(get_artist))
        .route("/api/artists/{id}/albums", get(get_artist_albums))
        .route("/api/playlists", get(get_playlists))
}

/// Write routes. These check the session themselves so that every failure,
/// including a missing session, reports `create_failed`.
pub fn write_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/playlists", post(create_playlist))
}

/// Every read failure is reported as `unauthorized`, whatever Spotify said.
fn read_failed(resource: &'static str) -> impl FnOnce(ProxyError) -> AppError {
    move |err| {
        tracing::warn!(error = %err, resource, "Spotify request failed");
        AppError::Unauthorized(UnauthorizedReason::Unauthorized)
    }
}

/// Malformed query strings and undecodable path segments fail like any
/// other read, without echoing the extractor's message.
fn rejected(err: impl std::fmt::Display) -> AppError {
    tracing::debug!(error = %err, "Rejected API request parameters");
    AppError::Unauthorized(UnauthorizedReason::Unauthorized)
}

fn parse_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn page(limit: Option<&str>, offset: Option<&str>) -> Page {
    Page {
        limit: parse_or(limit, DEFAULT_LIMIT),
        offset: parse_or(offset, DEFAULT_OFFSET),
    }
}

// ─── User Profile ────────────────────────────────────────────

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionTokens>,
) -> Result<Json<Value>> {
    state
        .spotify
        .current_user(&session.access_token)
        .await
        .map(Json)
        .map_err(read_failed("me"))
}

// ─── Artists ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct TopArtistsQuery {
    limit: Option<String>,
    offset: Option<String>,
    time_range: Option<String>,
}

async fn get_top_artists(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionTokens>,
    query: std::result::Result<Query<TopArtistsQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(query) = query.map_err(rejected)?;
    let time_range = query
        .time_range
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_TIME_RANGE);

    state
        .spotify
        .top_artists(
            &session.access_token,
            page(query.limit.as_deref(), query.offset.as_deref()),
            time_range,
        )
        .await
        .map(Json)
        .map_err(read_failed("top_artists"))
}

async fn get_artist(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionTokens>,
    artist_id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(artist_id) = artist_id.map_err(rejected)?;

    state
        .spotify
        .artist(&session.access_token, &artist_id)
        .await
        .map(Json)
        .map_err(read_failed("artist"))
}

#[derive(Deserialize)]
struct AlbumsQuery {
    limit: Option<String>,
    offset: Option<String>,
    include_groups: Option<String>,
}

async fn get_artist_albums(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionTokens>,
    artist_id: std::result::Result<Path<String>, PathRejection>,
    query: std::result::Result<Query<AlbumsQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Path(artist_id) = artist_id.map_err(rejected)?;
    let Query(query) = query.map_err(rejected)?;
    let include_groups = query
        .include_groups
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_INCLUDE_GROUPS);

    state
        .spotify
        .artist_albums(
            &session.access_token,
            &artist_id,
            page(query.limit.as_deref(), query.offset.as_deref()),
            include_groups,
        )
        .await
        .map(Json)
        .map_err(read_failed("artist_albums"))
}

// ─── Playlists ───────────────────────────────────────────────

#[derive(Deserialize)]
struct PlaylistsQuery {
    limit: Option<String>,
    offset: Option<String>,
}

async fn get_playlists(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionTokens>,
    query: std::result::Result<Query<PlaylistsQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(query) = query.map_err(rejected)?;
    state
        .spotify
        .playlists(
            &session.access_token,
            page(query.limit.as_deref(), query.offset.as_deref()),
        )
        .await
        .map(Json)
        .map_err(read_failed("playlists"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePlaylistRequest {
    name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    is_public: Value,
}

/// JavaScript truthiness, so `isPublic: "yes"` or `1` both mean public.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

async fn create_playlist(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: std::result::Result<Json<CreatePlaylistRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let session = read_session(&jar, &state).map_err(|err| {
        tracing::debug!(reason = ?err, "Playlist creation without usable session");
        AppError::CreateFailed
    })?;

    let Json(request) = body.map_err(|e| {
        tracing::debug!(error = %e, "Invalid playlist creation body");
        AppError::CreateFailed
    })?;

    let Some(name) = request.name else {
        tracing::debug!("Playlist creation body has no name");
        return Err(AppError::CreateFailed);
    };

    let playlist = NewPlaylist {
        name,
        description: request.description,
        public: truthy(&request.is_public),
    };

    let created = state
        .spotify
        .create_playlist(&session.access_token, &playlist)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Playlist creation failed");
            AppError::CreateFailed
        })?;

    tracing::info!(public = playlist.public, "Playlist created");

    Ok((StatusCode::CREATED, Json(created)))
}
