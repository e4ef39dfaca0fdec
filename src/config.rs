// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything here is read once at startup and never mutated afterwards.
//! The client secret and signing key stay server-side; neither is ever
//! written to a response or a log line.

use std::env;
use std::fmt;

/// Spotify OAuth client identity.
#[derive(Clone)]
pub struct ClientIdentity {
    pub client_id: String,
    pub client_secret: String,
    /// Registered callback URL, sent on authorize and code exchange.
    pub redirect_uri: String,
}

impl fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Browser origin allowed by CORS and the post-login redirect target
    pub frontend_url: String,
    /// Name of the session cookie
    pub cookie_name: String,
    /// Whether the session cookie is `Secure` (TLS deployments)
    pub secure_cookies: bool,
    /// Spotify accounts service (authorize + token endpoints)
    pub accounts_base_url: String,
    /// Spotify Web API base
    pub api_base_url: String,
    /// Server port
    pub port: u16,

    // --- Secrets ---
    /// Spotify OAuth client identity
    pub client: ClientIdentity,
    /// HS256 signing key for session credentials (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

pub const DEFAULT_FRONTEND_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_COOKIE_NAME: &str = "sp_session";
pub const DEFAULT_ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_PORT: u16 = 3001;

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            secure_cookies: false,
            accounts_base_url: DEFAULT_ACCOUNTS_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            port: DEFAULT_PORT,
            client: ClientIdentity {
                client_id: "test_client_id".to_string(),
                client_secret: "test_client_secret".to_string(),
                redirect_uri: "http://127.0.0.1:3001/auth/callback".to_string(),
            },
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local
    /// development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let frontend_url = env::var("CORS_ORIGIN")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string());

        // Follow the frontend's scheme unless told otherwise
        let secure_cookies = match env::var("COOKIE_SECURE") {
            Ok(v) => parse_bool("COOKIE_SECURE", &v)?,
            Err(_) => frontend_url.starts_with("https://"),
        };

        let port = match env::var("PORT") {
            Ok(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: v,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            frontend_url,
            cookie_name: env::var("COOKIE_NAME")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| DEFAULT_COOKIE_NAME.to_string()),
            secure_cookies,
            accounts_base_url: env::var("SPOTIFY_ACCOUNTS_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_ACCOUNTS_BASE_URL.to_string()),
            api_base_url: env::var("SPOTIFY_API_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            port,

            client: ClientIdentity {
                client_id: required("SPOTIFY_CLIENT_ID")?,
                client_secret: required("SPOTIFY_CLIENT_SECRET")?,
                redirect_uri: required("SPOTIFY_REDIRECT_URI")?,
            },
            jwt_signing_key: required("JWT_SECRET")?.into_bytes(),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    let value = env::var(name).map_err(|_| ConfigError::Missing(name))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Missing(name));
    }
    Ok(value.to_string())
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
