// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spotify-Relay: OAuth relay and session-cookie proxy for the Spotify Web API
//!
//! This crate provides the backend API that logs a browser in with Spotify,
//! keeps the provider tokens inside a signed cookie, and forwards
//! authenticated calls to the Web API.

pub mod config;
pub mod credential;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;

use config::Config;
use credential::SessionCodec;
use services::{HttpClient, SpotifyApiClient, SpotifyAuthClient};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub codec: SessionCodec,
    pub spotify_auth: SpotifyAuthClient,
    pub spotify: SpotifyApiClient,
}

impl AppState {
    /// Wire the services around one outbound HTTP client.
    pub fn new(config: Config, http: Arc<dyn HttpClient>) -> Self {
        let codec = SessionCodec::new(&config.jwt_signing_key);
        let spotify_auth = SpotifyAuthClient::new(
            http.clone(),
            config.accounts_base_url.clone(),
            config.client.clone(),
        );
        let spotify = SpotifyApiClient::new(http, config.api_base_url.clone());

        Self {
            config,
            codec,
            spotify_auth,
            spotify,
        }
    }
}
