// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer-token middleware for outgoing API calls.
//!
//! Every call goes through [`send_authenticated`], which:
//! - attaches the stored access token and picks the content type
//! - on a 401, refreshes the access token once and replays the request
//! - on a failed refresh, drops both tokens, tells every subscribed
//!   [`SessionObserver`] the session is gone and sends the client home
//!
//! A request is replayed at most once. Concurrent 401s each refresh on their
//! own; the store is overwritten with whichever token arrives last.

use crate::db::TokenStore;
use crate::error::{ClientError, Result};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::{Arc, RwLock, Weak};

/// Endpoint that trades a refresh token for a new access token.
pub const REFRESH_PATH: &str = "/auth/token/refresh/";

/// Moves the client to another location (a page, a prompt, a log line).
pub trait Navigator: Send + Sync {
    fn navigate(&self, location: &str);
}

/// Navigator that only logs. Used where there is no UI to move.
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, location: &str) {
        tracing::warn!(location, "Session ended, returning to home");
    }
}

/// Notified when the middleware ends the session on its own.
pub trait SessionObserver: Send + Sync {
    fn session_lost(&self);
}

/// The unauthenticated landing location and how to get there.
///
/// Clones share their observer list.
#[derive(Clone)]
pub struct HomeRedirect {
    location: String,
    navigator: Arc<dyn Navigator>,
    observers: Arc<RwLock<Vec<Weak<dyn SessionObserver>>>>,
}

impl HomeRedirect {
    pub fn new(location: impl Into<String>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            location: location.into(),
            navigator,
            observers: Arc::default(),
        }
    }

    /// Redirect that just logs the move.
    pub fn logging(location: impl Into<String>) -> Self {
        Self::new(location, Arc::new(LogNavigator))
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Register `observer` for session loss. Held weakly; dropped observers
    /// are pruned on the next redirect.
    pub fn subscribe(&self, observer: Weak<dyn SessionObserver>) {
        self.observers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(observer);
    }

    /// Tell observers the session is gone, then navigate home.
    pub fn redirect(&self) {
        let live: Vec<Arc<dyn SessionObserver>> = {
            let mut observers = self.observers.write().unwrap_or_else(|e| e.into_inner());
            observers.retain(|o| o.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        for observer in live {
            observer.session_lost();
        }
        self.navigator.navigate(&self.location);
    }
}

impl std::fmt::Debug for HomeRedirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeRedirect")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// Token refresh response.
///
/// The server rotates refresh tokens, so a new `refresh` may come back too.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Outgoing request hook.
///
/// Sets `Authorization: Bearer <access>` when an access token is stored.
/// Multipart bodies get no content type here so the transport can add one
/// with the boundary; everything else defaults to JSON.
pub fn attach_credentials(tokens: &TokenStore, request: &mut ApiRequest) -> Result<()> {
    if let Some(access) = tokens.access_token()? {
        request.set_bearer_token(&access)?;
    }
    set_content_type(request);
    Ok(())
}

fn set_content_type(request: &mut ApiRequest) {
    if request.is_multipart() {
        request.headers.remove(CONTENT_TYPE);
    } else if !request.headers.contains_key(CONTENT_TYPE) {
        request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
}

/// Trade `refresh_token` for a new access token and store the result.
///
/// Sent straight on the transport: the refresh call itself is never
/// authenticated or retried.
pub async fn refresh_access_token<T: Transport + ?Sized>(
    transport: &T,
    tokens: &TokenStore,
    refresh_token: &str,
) -> Result<String> {
    let mut request =
        ApiRequest::post(REFRESH_PATH).json(&serde_json::json!({ "refresh": refresh_token }))?;
    request
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let refreshed: TokenRefreshResponse = transport.send(&request).await?.error_for_status()?.json()?;

    match refreshed.refresh.as_deref() {
        Some(rotated) => tokens.set_tokens(&refreshed.access, rotated)?,
        None => tokens.replace_access_token(&refreshed.access)?,
    }
    Ok(refreshed.access)
}

/// Send `request` with credentials, recovering once from an expired token.
///
/// Returns the response only when it is a 2xx; any other status becomes
/// [`ClientError::Api`]. A failed refresh returns
/// [`ClientError::RefreshFailed`] after the session has been torn down.
pub async fn send_authenticated<T: Transport + ?Sized>(
    transport: &T,
    tokens: &TokenStore,
    home: &HomeRedirect,
    mut request: ApiRequest,
) -> Result<ApiResponse> {
    attach_credentials(tokens, &mut request)?;
    let response = transport.send(&request).await?;

    if response.is_success() {
        return Ok(response);
    }
    if response.status != StatusCode::UNAUTHORIZED || request.is_retried() {
        return response.error_for_status();
    }

    request.mark_retried();

    match tokens.refresh_token()? {
        Some(refresh_token) => {
            tracing::info!(
                method = %request.method,
                path = %request.path,
                "Access token rejected, refreshing"
            );

            let access = match refresh_access_token(transport, tokens, &refresh_token).await {
                Ok(access) => access,
                Err(e) => {
                    tracing::warn!(error = %e, "Token refresh failed, ending session");
                    if let Err(clear_err) = tokens.clear() {
                        tracing::error!(error = %clear_err, "Failed to clear tokens");
                    }
                    home.redirect();
                    return Err(ClientError::RefreshFailed(Box::new(e)));
                }
            };

            // The refreshed token, not whatever the store holds by now.
            request.set_bearer_token(&access)?;
        }
        None => {
            // Public endpoints also answer anonymous callers, so a stale
            // access token should not lock the user out of them.
            tracing::debug!(
                path = %request.path,
                "Rejected without a refresh token, retrying anonymously"
            );
            tokens.clear()?;
            request.clear_bearer_token();
        }
    }

    set_content_type(&mut request);
    transport.send(&request).await?.error_for_status()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::MultipartForm;

    fn tokens() -> TokenStore {
        TokenStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_attach_sets_bearer_and_json() {
        let tokens = tokens();
        tokens.set_tokens("A1", "R1").unwrap();

        let mut request = ApiRequest::get("/contests/");
        attach_credentials(&tokens, &mut request).unwrap();

        assert_eq!(request.bearer_token(), Some("A1"));
        assert_eq!(
            request.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_attach_without_token_sets_no_header() {
        let tokens = tokens();
        let mut request = ApiRequest::get("/entries/");
        attach_credentials(&tokens, &mut request).unwrap();

        assert_eq!(request.bearer_token(), None);
    }

    #[test]
    fn test_attach_leaves_multipart_content_type_to_transport() {
        let tokens = tokens();
        let mut request = ApiRequest::post("/entries/")
            .multipart(MultipartForm::new().text("title", "Frost"));
        request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        attach_credentials(&tokens, &mut request).unwrap();

        assert!(request.headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_redirect_reports_location() {
        #[derive(Default)]
        struct Recorder(std::sync::Mutex<Vec<String>>);
        impl Navigator for Recorder {
            fn navigate(&self, location: &str) {
                self.0.lock().unwrap().push(location.to_string());
            }
        }

        let recorder = Arc::new(Recorder::default());
        let home = HomeRedirect::new("/", recorder.clone());
        home.redirect();

        assert_eq!(*recorder.0.lock().unwrap(), vec!["/".to_string()]);
    }

    #[test]
    fn test_redirect_notifies_live_observers() {
        struct Seen(std::sync::atomic::AtomicBool);
        impl SessionObserver for Seen {
            fn session_lost(&self) {
                self.0.store(true, std::sync::atomic::Ordering::SeqCst);
            }
        }

        let home = HomeRedirect::logging("/");
        let kept = Arc::new(Seen(Default::default()));
        let kept_dyn: Arc<dyn SessionObserver> = kept.clone();
        home.subscribe(Arc::downgrade(&kept_dyn));
        {
            let dropped: Arc<dyn SessionObserver> = Arc::new(Seen(Default::default()));
            home.clone().subscribe(Arc::downgrade(&dropped));
        }

        home.redirect();

        assert!(kept.0.load(std::sync::atomic::Ordering::SeqCst));
        assert_eq!(home.observers.read().unwrap().len(), 1);
    }
}
