//! User model as returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a user account.
///
/// The role flags only decide which controls to offer. The server enforces
/// every permission on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_judge: bool,
    #[serde(default)]
    pub is_moderator: bool,
    #[serde(default)]
    pub is_staff: Option<bool>,
    #[serde(default)]
    pub is_superuser: Option<bool>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub entry_count: Option<u64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub social_accounts: Option<Vec<SocialAccount>>,
}

impl User {
    /// Staff and superusers get the admin-only controls.
    pub fn is_admin(&self) -> bool {
        self.is_staff.unwrap_or(false) || self.is_superuser.unwrap_or(false)
    }

    /// Moderators and admins see the moderation queue.
    pub fn can_moderate(&self) -> bool {
        self.is_moderator || self.is_admin()
    }

    /// Linked account for a provider (`twitter_oauth2`, `google`).
    pub fn social_account(&self, provider: &str) -> Option<&SocialAccount> {
        self.social_accounts
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|account| account.provider == provider)
    }
}

/// Third-party account linked to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialAccount {
    pub provider: String,
    pub uid: String,
    /// Twitter handle
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    /// Google display name
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}
