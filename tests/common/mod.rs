// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use spotify_relay::config::Config;
use spotify_relay::routes::create_router;
use spotify_relay::services::http::{
    HttpClient, HttpResponse, RequestBody, TransportError,
};
use spotify_relay::AppState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One outbound call seen by the fake Spotify.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub authorization: String,
    pub body: Option<RequestBody>,
}

/// Recording stand-in for Spotify. Replies are served in FIFO order; an
/// empty queue behaves like an unreachable host.
#[derive(Default)]
pub struct MockSpotify {
    requests: Mutex<Vec<RecordedRequest>>,
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
}

#[allow(dead_code)]
impl MockSpotify {
    pub fn reply_json(&self, status: StatusCode, body: serde_json::Value) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body.to_string())));
    }

    pub fn reply_transport_error(&self) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(TransportError("connection refused".to_string())));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: RecordedRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no reply queued".to_string())))
    }
}

#[async_trait]
impl HttpClient for MockSpotify {
    async fn get(&self, url: &str, authorization: &str) -> Result<HttpResponse, TransportError> {
        self.record(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            authorization: authorization.to_string(),
            body: None,
        })
    }

    async fn post(
        &self,
        url: &str,
        authorization: &str,
        body: RequestBody,
    ) -> Result<HttpResponse, TransportError> {
        self.record(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            authorization: authorization.to_string(),
            body: Some(body),
        })
    }
}

/// Create a test app around a fresh mock Spotify.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<MockSpotify>) {
    create_test_app_with_config(Config::default())
}

#[allow(dead_code)]
pub fn create_test_app_with_config(
    config: Config,
) -> (axum::Router, Arc<AppState>, Arc<MockSpotify>) {
    let mock = Arc::new(MockSpotify::default());
    let state = Arc::new(AppState::new(config, mock.clone()));
    (create_router(state.clone()), state, mock)
}

/// A valid credential for the test state.
#[allow(dead_code)]
pub fn session_cookie(state: &AppState, access_token: &str, refresh_token: &str) -> String {
    let credential = state
        .codec
        .encode(access_token, refresh_token, 3600)
        .expect("encode credential");
    format!("{}={}", state.config.cookie_name, credential)
}

#[allow(dead_code)]
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn post_json(uri: &str, cookie: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[allow(dead_code)]
pub fn post_empty(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[allow(dead_code)]
pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// Value of `name` in the first matching Set-Cookie header.
#[allow(dead_code)]
pub fn cookie_value(headers: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    headers.iter().find_map(|h| {
        h.strip_prefix(&prefix)
            .map(|rest| rest.split(';').next().unwrap_or("").to_string())
    })
}
