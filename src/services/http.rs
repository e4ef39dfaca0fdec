// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outbound HTTP seam.
//!
//! The token exchanger and the resource proxy talk to Spotify only through
//! [`HttpClient`], so tests can substitute a recording fake for the network.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;

/// Request body variants used against Spotify.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded`
    Form(Vec<(&'static str, String)>),
    /// `application/json`
    Json(serde_json::Value),
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// The request never produced a response (DNS, TLS, connect, read).
#[derive(Debug, thiserror::Error)]
#[error("HTTP transport error: {0}")]
pub struct TransportError(pub String);

/// Minimal HTTPS capability. `authorization` is the full header value.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, authorization: &str) -> Result<HttpResponse, TransportError>;

    async fn post(
        &self,
        url: &str,
        authorization: &str,
        body: RequestBody,
    ) -> Result<HttpResponse, TransportError>;
}

/// Production client backed by a shared `reqwest::Client` pool.
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    http: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    async fn finish(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<HttpResponse, TransportError> {
        let response = request
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(format!("reading response body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, authorization: &str) -> Result<HttpResponse, TransportError> {
        let request = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, authorization);

        self.finish(request).await
    }

    async fn post(
        &self,
        url: &str,
        authorization: &str,
        body: RequestBody,
    ) -> Result<HttpResponse, TransportError> {
        let request = self
            .http
            .post(url)
            .header(reqwest::header::AUTHORIZATION, authorization);

        let request = match body {
            RequestBody::Form(fields) => request.form(&fields),
            RequestBody::Json(value) => request.json(&value),
        };

        self.finish(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_json_and_status() {
        let ok = HttpResponse::new(StatusCode::OK, r#"{"id":"user123"}"#);
        assert!(ok.is_success());
        let value: serde_json::Value = ok.json().unwrap();
        assert_eq!(value["id"], "user123");

        let denied = HttpResponse::new(StatusCode::UNAUTHORIZED, "nope");
        assert!(!denied.is_success());
        assert!(denied.json::<serde_json::Value>().is_err());
    }
}
