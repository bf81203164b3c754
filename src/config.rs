//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_HOME_URL: &str = "/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the contest REST API (usually ends in `/api`)
    pub api_url: String,
    /// Where the client is sent when its session is lost
    pub home_url: String,
    /// JSON file backing the token store
    pub token_store_path: PathBuf,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            home_url: DEFAULT_HOME_URL.to_string(),
            token_store_path: PathBuf::from("session.json"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        reqwest::Url::parse(&api_url).map_err(|e| ConfigError::Invalid {
            name: "API_URL",
            reason: e.to_string(),
        })?;

        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigError::Invalid {
                    name: "REQUEST_TIMEOUT_SECS",
                    reason: e.to_string(),
                })?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url,
            home_url: env::var("HOME_URL").unwrap_or_else(|_| DEFAULT_HOME_URL.to_string()),
            token_store_path: env::var("TOKEN_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_token_store_path()),
            request_timeout,
            log_json: env::var("LOG_JSON")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    /// Server origin without the `/api` suffix (for media and OAuth links).
    pub fn backend_base_url(&self) -> &str {
        let trimmed = self.api_url.strip_suffix('/').unwrap_or(&self.api_url);
        trimmed.strip_suffix("/api").unwrap_or(trimmed)
    }
}

/// `~/.config/photo-contest/session.json`, or a relative fallback when no
/// config directory is known.
pub fn default_token_store_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("photo-contest").join("session.json")
    } else if let Some(home_dir) = dirs::home_dir() {
        home_dir
            .join(".config")
            .join("photo-contest")
            .join("session.json")
    } else {
        PathBuf::from(".photo-contest").join("session.json")
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
