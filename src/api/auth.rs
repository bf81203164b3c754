//! Authentication endpoints.

use crate::error::Result;
use crate::middleware::auth::refresh_access_token;
use crate::models::User;
use crate::services::ApiClient;
use crate::transport::{ApiRequest, Transport};
use serde::{Deserialize, Serialize};

/// Tokens and profile returned by a federated login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

pub struct AuthApi<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AuthApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Exchange a Google ID token for API tokens.
    ///
    /// Does not store anything; see [`crate::services::AuthSession::login`].
    pub async fn google_login(&self, id_token: &str) -> Result<LoginResponse> {
        self.client
            .fetch(ApiRequest::post("/auth/google/").json(&serde_json::json!({ "id_token": id_token }))?)
            .await
    }

    /// Server-side logout.
    pub async fn logout(&self) -> Result<()> {
        self.client.send(ApiRequest::post("/auth/logout/")).await
    }

    /// Current user.
    pub async fn me(&self) -> Result<User> {
        self.client.get_json("/users/me/").await
    }

    /// Force a refresh with the stored refresh token, outside the 401 path.
    ///
    /// Returns `Ok(None)` when there is no refresh token.
    pub async fn refresh(&self) -> Result<Option<String>> {
        match self.client.tokens().refresh_token()? {
            Some(refresh) => {
                refresh_access_token(self.client.transport(), self.client.tokens(), &refresh)
                    .await
                    .map(Some)
            }
            None => Ok(None),
        }
    }
}
