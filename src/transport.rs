// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wire-level request/response types and the transport that sends them.
//!
//! Requests are plain data so the auth middleware can inspect and replay
//! them. A [`Transport`] turns one into exactly one HTTP exchange and does
//! not interpret the status code.

use crate::error::{ClientError, Result};
use crate::models::MultipartForm;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

/// An API request relative to the client's base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API base, starting with `/` (e.g. `/users/me/`)
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: RequestBody,
    retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn query_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self.body, RequestBody::Multipart(_))
    }

    /// Token from the `Authorization: Bearer` header, if any.
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
    }

    pub fn set_bearer_token(&mut self, token: &str) -> Result<()> {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ClientError::InvalidRequest(format!("bad token header: {}", e)))?;
        self.headers.insert(AUTHORIZATION, value);
        Ok(())
    }

    pub fn clear_bearer_token(&mut self) {
        self.headers.remove(AUTHORIZATION);
    }

    /// Whether this request has already been replayed after a 401.
    pub fn is_retried(&self) -> bool {
        self.retried
    }

    pub(crate) fn mark_retried(&mut self) {
        self.retried = true;
    }
}

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parse the body as JSON. An empty body decodes as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let body = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        serde_json::from_str(body)
            .map_err(|e| ClientError::Decode(format!("{} (status {})", e, self.status)))
    }

    /// Convert a non-2xx response into the error the caller sees.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Api {
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// Sends a single request and returns the raw response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        (**self).send(request).await
    }
}

/// Transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::InvalidRequest(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(&request.path);
        tracing::debug!(method = %request.method, url = %url, "Sending API request");

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(request.headers.clone());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(form) => builder.multipart(form.to_reqwest()?),
        };

        let response = builder.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(format!("failed to read response: {}", e)))?;

        tracing::debug!(method = %request.method, url = %url, status = %status, "API response");

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header_roundtrip() {
        let mut request = ApiRequest::get("/users/me/");
        assert_eq!(request.bearer_token(), None);

        request.set_bearer_token("A1").unwrap();
        assert_eq!(request.bearer_token(), Some("A1"));

        request.clear_bearer_token();
        assert_eq!(request.bearer_token(), None);
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        let mut request = ApiRequest::get("/users/me/");
        assert!(request.set_bearer_token("bad\ntoken").is_err());
    }

    #[test]
    fn test_url_for_joins_without_double_slash() {
        let transport =
            ReqwestTransport::new("http://localhost:8080/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            transport.url_for("/contests/"),
            "http://localhost:8080/api/contests/"
        );
        assert_eq!(
            transport.url_for("entries/"),
            "http://localhost:8080/api/entries/"
        );
    }

    #[test]
    fn test_error_for_status() {
        let ok = ApiResponse::new(StatusCode::CREATED, "{}");
        assert!(ok.error_for_status().is_ok());

        let err = ApiResponse::new(StatusCode::BAD_REQUEST, r#"{"title":["required"]}"#)
            .error_for_status()
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_empty_body_decodes_as_unit() {
        let response = ApiResponse::new(StatusCode::NO_CONTENT, "");
        assert!(response.json::<()>().is_ok());
        let none: Option<u32> = response.json().unwrap();
        assert_eq!(none, None);
    }
}
