// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spotify Web API client for the resources the frontend renders.
//!
//! Handles:
//! - Profile, top artists, artist and album lookups
//! - Listing and creating playlists
//!
//! Response bodies are returned as raw JSON; their shape is Spotify's.

use crate::services::http::{HttpClient, HttpResponse, RequestBody, TransportError};
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub const DEFAULT_LIMIT: u32 = 20;
pub const DEFAULT_OFFSET: u32 = 0;
pub const DEFAULT_TIME_RANGE: &str = "short_term";
pub const DEFAULT_INCLUDE_GROUPS: &str = "album,single";

/// Pagination window forwarded to list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

/// Body sent to `POST /users/{id}/playlists`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewPlaylist {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub public: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Spotify returned {0}")]
    Status(StatusCode),

    #[error("unexpected Spotify response: {0}")]
    Malformed(String),
}

/// Spotify Web API client.
#[derive(Clone)]
pub struct SpotifyApiClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl SpotifyApiClient {
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Get the current user's profile.
    pub async fn current_user(&self, access_token: &str) -> Result<Value, ProxyError> {
        let url = format!("{}/me", self.base_url);
        self.get_json(&url, access_token).await
    }

    /// Get the current user's top artists.
    pub async fn top_artists(
        &self,
        access_token: &str,
        page: Page,
        time_range: &str,
    ) -> Result<Value, ProxyError> {
        let url = format!(
            "{}/me/top/artists?limit={}&offset={}&time_range={}",
            self.base_url,
            page.limit,
            page.offset,
            urlencoding::encode(time_range)
        );
        self.get_json(&url, access_token).await
    }

    /// Get a single artist by ID.
    pub async fn artist(&self, access_token: &str, artist_id: &str) -> Result<Value, ProxyError> {
        let url = format!(
            "{}/artists/{}",
            self.base_url,
            urlencoding::encode(artist_id)
        );
        self.get_json(&url, access_token).await
    }

    /// List an artist's albums.
    pub async fn artist_albums(
        &self,
        access_token: &str,
        artist_id: &str,
        page: Page,
        include_groups: &str,
    ) -> Result<Value, ProxyError> {
        let url = format!(
            "{}/artists/{}/albums?limit={}&offset={}&include_groups={}",
            self.base_url,
            urlencoding::encode(artist_id),
            page.limit,
            page.offset,
            urlencoding::encode(include_groups)
        );
        self.get_json(&url, access_token).await
    }

    /// List the current user's playlists.
    pub async fn playlists(&self, access_token: &str, page: Page) -> Result<Value, ProxyError> {
        let url = format!(
            "{}/me/playlists?limit={}&offset={}",
            self.base_url, page.limit, page.offset
        );
        self.get_json(&url, access_token).await
    }

    /// Create a playlist owned by the current user.
    ///
    /// Resolves the user ID from the profile first, then creates the
    /// playlist under `users/{id}/playlists`.
    pub async fn create_playlist(
        &self,
        access_token: &str,
        playlist: &NewPlaylist,
    ) -> Result<Value, ProxyError> {
        let profile = self.current_user(access_token).await?;
        let user_id = profile
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| ProxyError::Malformed("profile has no id".to_string()))?;

        let url = format!(
            "{}/users/{}/playlists",
            self.base_url,
            urlencoding::encode(user_id)
        );
        let body = serde_json::to_value(playlist)
            .map_err(|e| ProxyError::Malformed(format!("playlist body: {e}")))?;

        let response = self
            .http
            .post(&url, &bearer(access_token), RequestBody::Json(body))
            .await?;

        check_response_json(response)
    }

    /// Generic GET request with JSON response.
    async fn get_json(&self, url: &str, access_token: &str) -> Result<Value, ProxyError> {
        let response = self.http.get(url, &bearer(access_token)).await?;
        check_response_json(response)
    }
}

fn bearer(access_token: &str) -> String {
    format!("Bearer {access_token}")
}

/// Check response status and parse the JSON body.
fn check_response_json(response: HttpResponse) -> Result<Value, ProxyError> {
    if !response.is_success() {
        if response.status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Spotify rate limit hit (429)");
        } else {
            tracing::debug!(status = %response.status, "Spotify request failed");
        }
        return Err(ProxyError::Status(response.status));
    }

    response
        .json()
        .map_err(|e| ProxyError::Malformed(format!("JSON parse error: {e}")))
}
