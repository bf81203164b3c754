// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types.

use reqwest::StatusCode;

/// Error returned by every client operation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Token refresh failed: {0}")]
    RefreshFailed(Box<ClientError>),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Token storage error: {0}")]
    Storage(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// HTTP status of a server-side error, if there was a response at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 401 response that the client could not recover from.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// True when the request never reached the server.
    pub fn is_network_error(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    /// True when the stored session can no longer be trusted.
    ///
    /// Covers an unrecovered 401, a failed refresh, and an unreachable
    /// server. A stale session cannot be told apart from a dead network at
    /// the call sites that use this.
    pub fn is_session_loss(&self) -> bool {
        self.is_unauthorized()
            || self.is_network_error()
            || matches!(self, ClientError::RefreshFailed(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if err.is_builder() {
            ClientError::InvalidRequest(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
