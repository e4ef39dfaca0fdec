// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - Spotify-facing clients.

pub mod http;
pub mod spotify;
pub mod spotify_auth;

pub use http::{HttpClient, ReqwestHttpClient};
pub use spotify::SpotifyApiClient;
pub use spotify_auth::SpotifyAuthClient;
