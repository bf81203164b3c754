// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication state for one client session.
//!
//! [`AuthSession`] owns the current user and status and is the only place
//! that logs in, logs out or (re)loads the user. It shares the token store
//! with the [`ApiClient`] it wraps and subscribes to the client's home
//! redirect, so a refresh failure inside any client call resets the session
//! to `Unauthenticated` and persists that right away.
//!
//! Status moves `Unknown -> Loading -> Authenticated | Unauthenticated`.
//! Only [`AuthSession::load_user`] leaves `Unknown`; a restored snapshot
//! fills in the cached user but does not claim the session is valid.

use crate::db::{keys, KeyValueStore};
use crate::error::{ClientError, Result};
use crate::middleware::auth::SessionObserver;
use crate::models::User;
use crate::services::ApiClient;
use crate::transport::{ReqwestTransport, Transport};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// Nothing checked yet
    #[default]
    Unknown,
    Loading,
    Authenticated,
    Unauthenticated,
}

/// Snapshot of the session as the rest of the program sees it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub status: AuthStatus,
    pub user: Option<User>,
}

impl AuthState {
    fn unauthenticated() -> Self {
        Self {
            status: AuthStatus::Unauthenticated,
            user: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.status == AuthStatus::Loading
    }
}

/// What survives a restart. Tokens are stored separately and never here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

/// State shared between the session and the client's redirect hook.
struct SharedState {
    state: RwLock<AuthState>,
    kv: Arc<dyn KeyValueStore>,
}

impl SharedState {
    fn snapshot(&self) -> AuthSnapshot {
        let state = self.read();
        AuthSnapshot {
            user: state.user.clone(),
            is_authenticated: state.is_authenticated(),
        }
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.snapshot())?;
        self.kv.set(keys::AUTH_SNAPSHOT, &json)
    }

    fn set_state(&self, state: AuthState) {
        self.shared.set_state(state);
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthState> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionObserver for SharedState {
    fn session_lost(&self) {
        tracing::info!("Session lost, marking unauthenticated");
        self.set_state(AuthState::unauthenticated());
    }
}

/// Current user plus the operations that change it.
pub struct AuthSession<T: Transport = ReqwestTransport> {
    client: Arc<ApiClient<T>>,
    shared: Arc<SharedState>,
}

impl<T: Transport> AuthSession<T> {
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        let shared = Arc::new(SharedState {
            state: RwLock::new(AuthState::default()),
            kv: client.tokens().kv().clone(),
        });
        let observer: Arc<dyn SessionObserver> = shared.clone();
        client.home().subscribe(Arc::downgrade(&observer));

        Self { client, shared }
    }

    pub fn client(&self) -> &Arc<ApiClient<T>> {
        &self.client
    }

    pub fn state(&self) -> AuthState {
        self.read().clone()
    }

    pub fn status(&self) -> AuthStatus {
        self.read().status
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    /// Sign in with a Google ID token.
    ///
    /// On failure the previous state is put back and the error returned,
    /// unless the client already ended the session.
    pub async fn login(&self, credential: &str) -> Result<User> {
        let previous = self.set_status(AuthStatus::Loading);

        let response = match self.client.auth().google_login(credential).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                if !matches!(e, ClientError::RefreshFailed(_)) {
                    *self.write() = previous;
                }
                return Err(e);
            }
        };

        if let Err(e) = self
            .client
            .tokens()
            .set_tokens(&response.access, &response.refresh)
        {
            *self.write() = previous;
            return Err(e);
        }

        tracing::info!(user_id = response.user.id, username = %response.user.username, "Logged in");
        self.set_state(AuthState {
            status: AuthStatus::Authenticated,
            user: Some(response.user.clone()),
        });
        Ok(response.user)
    }

    /// Forget the tokens and the user. No server call is made.
    pub fn logout(&self) -> Result<()> {
        let cleared = self.client.tokens().clear();
        self.set_state(AuthState::unauthenticated());
        tracing::info!("Logged out");
        cleared
    }

    /// Check the stored access token against `GET /users/me/`.
    ///
    /// Never fails: any error ends up as `Unauthenticated`. Tokens are
    /// dropped when the error means the session is gone (401, failed
    /// refresh, server unreachable).
    pub async fn load_user(&self) -> AuthState {
        let has_access = match self.client.tokens().access_token() {
            Ok(token) => token.is_some(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read access token");
                false
            }
        };
        if !has_access {
            self.set_state(AuthState::unauthenticated());
            return self.state();
        }

        self.set_status(AuthStatus::Loading);

        match self.client.auth().me().await {
            Ok(user) => {
                tracing::debug!(user_id = user.id, "Loaded current user");
                self.set_state(AuthState {
                    status: AuthStatus::Authenticated,
                    user: Some(user),
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load current user");
                if e.is_session_loss() {
                    if let Err(clear_err) = self.client.tokens().clear() {
                        tracing::error!(error = %clear_err, "Failed to clear tokens");
                    }
                }
                self.set_state(AuthState::unauthenticated());
            }
        }
        self.state()
    }

    /// Take the token pair handed over by an OAuth redirect, then load the
    /// user it belongs to.
    pub async fn accept_callback_tokens(&self, access: &str, refresh: &str) -> Result<AuthState> {
        self.client.tokens().set_tokens(access, refresh)?;
        Ok(self.load_user().await)
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.shared.snapshot()
    }

    /// Write the snapshot under `auth-storage`.
    pub fn persist(&self) -> Result<()> {
        self.shared.persist()
    }

    /// Fill the cached user from a saved snapshot.
    ///
    /// An unreadable snapshot is discarded.
    pub fn restore(&self) -> Result<Option<AuthSnapshot>> {
        let kv = self.client.tokens().kv();
        let Some(json) = kv.get(keys::AUTH_SNAPSHOT)? else {
            return Ok(None);
        };

        let snapshot: AuthSnapshot = match serde_json::from_str(&json) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable auth snapshot");
                kv.remove(keys::AUTH_SNAPSHOT)?;
                return Ok(None);
            }
        };

        self.write().user = snapshot.user.clone();
        Ok(Some(snapshot))
    }

    fn set_state(&self, state: AuthState) {
        self.shared.set_state(state);
    }

    /// Change only the status, returning the state as it was.
    fn set_status(&self, status: AuthStatus) -> AuthState {
        let mut state = self.write();
        let previous = state.clone();
        state.status = status;
        previous
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthState> {
        self.shared.read()
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthState> {
        self.shared.write()
    }
}
