// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contest API client.
//!
//! Handles:
//! - Bearer token injection on every call
//! - Transparent token refresh and a single replay on 401
//! - JSON decoding of responses
//! - Access to the per-resource request builders in [`crate::api`]

use crate::api::{
    AuthApi, CategoriesApi, ContestsApi, CriteriaApi, EntriesApi, ScoresApi, UsersApi, VotesApi,
};
use crate::config::Config;
use crate::db::{KeyValueStore, TokenStore};
use crate::error::Result;
use crate::middleware::auth::{send_authenticated, HomeRedirect, Navigator};
use crate::transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Authenticated client for the contest API.
///
/// Share it behind an `Arc`; all methods take `&self`.
pub struct ApiClient<T: Transport = ReqwestTransport> {
    transport: T,
    tokens: TokenStore,
    home: HomeRedirect,
}

impl ApiClient<ReqwestTransport> {
    /// Build a `reqwest`-backed client from configuration.
    pub fn from_config(
        config: &Config,
        kv: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let transport = ReqwestTransport::new(&config.api_url, config.request_timeout)?;
        Ok(Self::new(transport, TokenStore::new(kv))
            .with_home(HomeRedirect::new(config.home_url.clone(), navigator)))
    }
}

impl<T: Transport> ApiClient<T> {
    /// Create a client whose session-loss redirect only logs.
    pub fn new(transport: T, tokens: TokenStore) -> Self {
        Self {
            transport,
            tokens,
            home: HomeRedirect::logging("/"),
        }
    }

    pub fn with_home(mut self, home: HomeRedirect) -> Self {
        self.home = home;
        self
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn home(&self) -> &HomeRedirect {
        &self.home
    }

    /// Send a request through the auth middleware.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        send_authenticated(&self.transport, &self.tokens, &self.home, request).await
    }

    /// Send a request and decode the JSON response.
    pub async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        self.execute(request).await?.json()
    }

    /// Send a request whose response body is not needed.
    pub async fn send(&self, request: ApiRequest) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }

    /// Generic GET request with JSON response.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.fetch(ApiRequest::get(path)).await
    }

    // ─── Resources ───────────────────────────────────────────────────────────

    pub fn auth(&self) -> AuthApi<'_, T> {
        AuthApi::new(self)
    }

    pub fn contests(&self) -> ContestsApi<'_, T> {
        ContestsApi::new(self)
    }

    pub fn entries(&self) -> EntriesApi<'_, T> {
        EntriesApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_, T> {
        UsersApi::new(self)
    }

    pub fn categories(&self) -> CategoriesApi<'_, T> {
        CategoriesApi::new(self)
    }

    pub fn criteria(&self) -> CriteriaApi<'_, T> {
        CriteriaApi::new(self)
    }

    pub fn votes(&self) -> VotesApi<'_, T> {
        VotesApi::new(self)
    }

    pub fn scores(&self) -> ScoresApi<'_, T> {
        ScoresApi::new(self)
    }
}
