//! Entry (photo submission) models.

use super::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference from an entry to its contest.
///
/// Older responses carry the numeric primary key, newer ones the slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContestRef {
    Id(u64),
    Slug(String),
}

/// A submitted entry with its images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// UUID assigned by the server
    pub id: String,
    pub contest: ContestRef,
    #[serde(default)]
    pub contest_slug: Option<String>,
    #[serde(default)]
    pub contest_title: Option<String>,
    #[serde(default)]
    pub author: Option<User>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Comma separated
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub images: Vec<EntryImage>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub flagged: bool,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub user_voted: Option<bool>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl Entry {
    /// Tags split on commas, trimmed, empties dropped.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryImage {
    pub id: u64,
    pub image: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub is_thumbnail_ready: bool,
    #[serde(default)]
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

/// Moderation report against an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    pub id: u64,
    pub entry: String,
    pub user: User,
    pub reason: String,
    #[serde(default)]
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}
