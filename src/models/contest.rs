// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contest model and phase derivation.

use super::judging::{Category, JudgingCriteria};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How entries of a contest are judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JudgingType {
    /// Judges cast votes (optionally per category)
    #[default]
    Vote,
    /// Judges score entries against criteria
    Score,
}

/// A photo contest.
///
/// The list endpoint returns a subset of these fields, so everything beyond
/// the schedule and identity defaults when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub banner_image: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(default)]
    pub voting_end_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default = "default_max_entries")]
    pub max_entries_per_user: u32,
    #[serde(default = "default_max_images")]
    pub max_images_per_entry: u32,
    #[serde(default)]
    pub judging_type: JudgingType,
    #[serde(default)]
    pub max_votes_per_judge: Option<u32>,
    #[serde(default)]
    pub auto_approve_entries: bool,
    #[serde(default)]
    pub twitter_hashtag: Option<String>,
    #[serde(default)]
    pub twitter_auto_fetch: bool,
    #[serde(default)]
    pub twitter_auto_approve: bool,
    #[serde(default)]
    pub require_twitter_account: bool,
    /// Phase as computed by the server at response time
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub entry_count: u64,
    #[serde(default)]
    pub creator_username: Option<String>,
    #[serde(default)]
    pub is_owner: bool,
    #[serde(default)]
    pub is_judge: bool,
    #[serde(default)]
    pub judge_count: Option<u32>,
    #[serde(default)]
    pub judges: Option<Vec<JudgeSummary>>,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    #[serde(default)]
    pub judging_criteria: Option<Vec<JudgingCriteria>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

fn default_max_entries() -> u32 {
    1
}

fn default_max_images() -> u32 {
    5
}

impl Contest {
    /// Phase of the contest at `now`, derived from its schedule.
    pub fn phase_at(&self, now: DateTime<Utc>) -> ContestPhase {
        ContestPhase::derive(self.start_at, self.end_at, self.voting_end_at, now)
    }

    /// Phase reported by the server, falling back to the local schedule when
    /// the field is missing or unrecognised.
    pub fn reported_phase(&self, now: DateTime<Utc>) -> ContestPhase {
        self.phase
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(|| self.phase_at(now))
    }

    /// Site-relative link to the contest page.
    pub fn link(&self) -> String {
        format!("/contests/{}", self.slug)
    }
}

/// Lifecycle phase of a contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestPhase {
    Upcoming,
    Submission,
    Voting,
    Closed,
}

impl ContestPhase {
    /// Phase boundaries are inclusive on the submission window and on the
    /// voting deadline.
    pub fn derive(
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        voting_end_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        if now < start_at {
            return ContestPhase::Upcoming;
        }
        if now <= end_at {
            return ContestPhase::Submission;
        }
        match voting_end_at {
            Some(voting_end) if now <= voting_end => ContestPhase::Voting,
            _ => ContestPhase::Closed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContestPhase::Upcoming => "upcoming",
            ContestPhase::Submission => "submission",
            ContestPhase::Voting => "voting",
            ContestPhase::Closed => "closed",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            ContestPhase::Upcoming => "Upcoming",
            ContestPhase::Submission => "Accepting entries",
            ContestPhase::Voting => "Voting open",
            ContestPhase::Closed => "Closed",
        }
    }

    /// Badge color tag.
    pub fn color(&self) -> &'static str {
        match self {
            ContestPhase::Upcoming => "gray",
            ContestPhase::Submission => "green",
            ContestPhase::Voting => "blue",
            ContestPhase::Closed => "slate",
        }
    }
}

impl fmt::Display for ContestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContestPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(ContestPhase::Upcoming),
            "submission" => Ok(ContestPhase::Submission),
            "voting" => Ok(ContestPhase::Voting),
            "closed" => Ok(ContestPhase::Closed),
            other => Err(format!("unknown contest phase: {other}")),
        }
    }
}

/// Judge as embedded in a contest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeSummary {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Response of `GET /contests/<slug>/statistics/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestStatistics {
    pub daily_entries: Vec<DailyEntryCount>,
    pub total_entries: u64,
    pub pending_entries: u64,
    pub total_votes: u64,
    pub unique_voters: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntryCount {
    pub date: NaiveDate,
    pub count: u64,
}
