// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spotify accounts service: authorize URL, code exchange, token refresh.
//!
//! Both token grants POST to `{accounts}/api/token` with HTTP Basic client
//! authentication. Nothing here retries: a used authorization code can never
//! succeed twice, and a failed refresh is surfaced to the caller.

use crate::config::ClientIdentity;
use crate::services::http::{HttpClient, RequestBody, TransportError};
use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use std::sync::Arc;

/// Scopes requested on every authorization. Fixed; not caller-controlled.
pub const SCOPES: [&str; 6] = [
    "user-read-email",
    "user-read-private",
    "playlist-read-private",
    "playlist-modify-private",
    "playlist-modify-public",
    "user-top-read",
];

/// Token grant returned by Spotify for both exchange and refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always present on code exchange; optional on refresh.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Seconds until the access token expires.
    pub expires_in: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamExchangeError {
    #[error("token endpoint unreachable: {0}")]
    Transport(#[from] TransportError),

    #[error("token endpoint returned {status}")]
    Rejected { status: StatusCode },

    #[error("malformed token response: {0}")]
    Malformed(String),
}

/// Performs the provider-facing token operations for one client identity.
#[derive(Clone)]
pub struct SpotifyAuthClient {
    http: Arc<dyn HttpClient>,
    accounts_base_url: String,
    client: ClientIdentity,
}

impl SpotifyAuthClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        accounts_base_url: impl Into<String>,
        client: ClientIdentity,
    ) -> Self {
        Self {
            http,
            accounts_base_url: accounts_base_url.into(),
            client,
        }
    }

    /// Build the URL the browser is sent to for consent.
    pub fn authorization_url(&self) -> String {
        format!(
            "{}/authorize?\
             response_type=code&\
             client_id={}&\
             scope={}&\
             redirect_uri={}",
            self.accounts_base_url,
            urlencoding::encode(&self.client.client_id),
            urlencoding::encode(&SCOPES.join(" ")),
            urlencoding::encode(&self.client.redirect_uri),
        )
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, UpstreamExchangeError> {
        let tokens = self
            .request_token(vec![
                ("grant_type", "authorization_code".to_string()),
                ("code", code.to_string()),
                ("redirect_uri", self.client.redirect_uri.clone()),
            ])
            .await?;

        if tokens.refresh_token.is_none() {
            return Err(UpstreamExchangeError::Malformed(
                "code exchange returned no refresh_token".to_string(),
            ));
        }

        Ok(tokens)
    }

    /// Obtain a new access token. Spotify may or may not rotate the refresh
    /// token; callers keep the old one when `refresh_token` is `None`.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, UpstreamExchangeError> {
        self.request_token(vec![
            ("grant_type", "refresh_token".to_string()),
            ("refresh_token", refresh_token.to_string()),
        ])
        .await
    }

    async fn request_token(
        &self,
        form: Vec<(&'static str, String)>,
    ) -> Result<TokenResponse, UpstreamExchangeError> {
        let url = format!("{}/api/token", self.accounts_base_url);

        let response = self
            .http
            .post(&url, &self.basic_authorization(), RequestBody::Form(form))
            .await?;

        if !response.is_success() {
            tracing::error!(
                status = %response.status,
                body = %String::from_utf8_lossy(&response.body),
                "Spotify token request rejected"
            );
            return Err(UpstreamExchangeError::Rejected {
                status: response.status,
            });
        }

        response
            .json()
            .map_err(|e| UpstreamExchangeError::Malformed(e.to_string()))
    }

    fn basic_authorization(&self) -> String {
        let raw = format!("{}:{}", self.client.client_id, self.client.client_secret);
        format!("Basic {}", STANDARD.encode(raw))
    }
}
