// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access/refresh token storage.
//!
//! Both tokens live in a [`KeyValueStore`] under fixed keys. The store is only
//! ever written through this type, which keeps the two tokens paired: they are
//! set together and cleared together. The one exception is a refresh that
//! returns only a new access token, which replaces the access token while the
//! refresh token stays in place.

use super::{keys, KeyValueStore};
use crate::error::{ClientError, Result};
use std::sync::Arc;

/// Handle to the token pair. Cheap to clone.
#[derive(Clone)]
pub struct TokenStore {
    kv: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}

impl TokenStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Underlying store, shared with the auth snapshot.
    pub fn kv(&self) -> &Arc<dyn KeyValueStore> {
        &self.kv
    }

    pub fn access_token(&self) -> Result<Option<String>> {
        self.kv.get(keys::ACCESS_TOKEN)
    }

    pub fn refresh_token(&self) -> Result<Option<String>> {
        self.kv.get(keys::REFRESH_TOKEN)
    }

    /// Store a freshly issued pair (login, OAuth callback, rotating refresh).
    pub fn set_tokens(&self, access: &str, refresh: &str) -> Result<()> {
        if access.is_empty() || refresh.is_empty() {
            return Err(ClientError::Storage(
                "refusing to store an empty token".to_string(),
            ));
        }
        self.kv
            .set_many(&[(keys::REFRESH_TOKEN, refresh), (keys::ACCESS_TOKEN, access)])
    }

    /// Replace the access token after a successful refresh.
    ///
    /// Fails when there is no refresh token, since that would leave a lone
    /// access token behind.
    pub fn replace_access_token(&self, access: &str) -> Result<()> {
        if access.is_empty() {
            return Err(ClientError::Storage(
                "refusing to store an empty token".to_string(),
            ));
        }
        if !self.kv.contains(keys::REFRESH_TOKEN)? {
            return Err(ClientError::Storage(
                "no refresh token to pair the new access token with".to_string(),
            ));
        }
        self.kv.set(keys::ACCESS_TOKEN, access)
    }

    /// Drop both tokens.
    pub fn clear(&self) -> Result<()> {
        self.kv.remove_many(&[keys::ACCESS_TOKEN, keys::REFRESH_TOKEN])
    }

    pub fn has_tokens(&self) -> Result<bool> {
        Ok(self.access_token()?.is_some() && self.refresh_token()?.is_some())
    }
}
