// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use photo_contest_client::db::{KeyValueStore, MemoryStore, TokenStore};
use photo_contest_client::error::{ClientError, Result};
use photo_contest_client::middleware::{HomeRedirect, Navigator};
use photo_contest_client::transport::{ApiRequest, ApiResponse, Transport};
use photo_contest_client::ApiClient;
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};

type Handler = Box<dyn Fn(&ApiRequest) -> Result<ApiResponse> + Send + Sync>;

/// Transport that answers from a closure and records every request it sees.
pub struct MockTransport {
    handler: Handler,
    requests: Mutex<Vec<ApiRequest>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&ApiRequest) -> Result<ApiResponse> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Every request answers `status` with `body`.
    pub fn always(status: StatusCode, body: serde_json::Value) -> Arc<Self> {
        Self::new(move |_| Ok(json_response(status, &body)))
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    /// Number of requests sent to `path`.
    pub fn calls_to(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());
        (self.handler)(request)
    }
}

/// Navigator that remembers where it was sent.
#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, location: &str) {
        self.visits.lock().unwrap().push(location.to_string());
    }
}

/// Client over `transport` with an in-memory store and a recording redirect.
#[allow(dead_code)]
pub fn test_client(
    transport: Arc<MockTransport>,
) -> (ApiClient<Arc<MockTransport>>, Arc<RecordingNavigator>) {
    test_client_with_store(transport, Arc::new(MemoryStore::new()))
}

#[allow(dead_code)]
pub fn test_client_with_store(
    transport: Arc<MockTransport>,
    kv: Arc<dyn KeyValueStore>,
) -> (ApiClient<Arc<MockTransport>>, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let client = ApiClient::new(transport, TokenStore::new(kv))
        .with_home(HomeRedirect::new("/", navigator.clone()));
    (client, navigator)
}

#[allow(dead_code)]
pub fn json_response(status: StatusCode, body: &serde_json::Value) -> ApiResponse {
    ApiResponse::new(status, body.to_string())
}

#[allow(dead_code)]
pub fn unauthorized() -> ApiResponse {
    json_response(
        StatusCode::UNAUTHORIZED,
        &serde_json::json!({
            "detail": "Given token not valid for any token type",
            "code": "token_not_valid"
        }),
    )
}

#[allow(dead_code)]
pub fn network_down() -> ClientError {
    ClientError::Network("connection refused".to_string())
}

#[allow(dead_code)]
pub fn user_json(id: u64, username: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "avatar_url": null,
        "is_judge": false,
        "is_moderator": false,
        "created_at": "2026-01-15T10:00:00Z"
    })
}

#[allow(dead_code)]
pub fn contest_json(slug: &str, voting_end: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "slug": slug,
        "title": format!("Contest {slug}"),
        "description": "",
        "start_at": "2026-06-01T00:00:00Z",
        "end_at": "2026-06-15T00:00:00Z",
        "voting_end_at": voting_end,
        "is_public": true,
        "phase": "upcoming",
        "entry_count": 0,
        "created_at": "2026-05-01T00:00:00Z"
    })
}
