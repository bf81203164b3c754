// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Judging models: categories, criteria, votes and scores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Award category within a contest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub contest: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: i32,
    /// `None` means the contest-wide limit applies
    #[serde(default)]
    pub max_votes_per_judge: Option<u32>,
    #[serde(default)]
    pub entry_count: u64,
    pub created_at: DateTime<Utc>,
}

/// Scoring criterion, optionally scoped to a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgingCriteria {
    pub id: u64,
    pub contest: u64,
    #[serde(default)]
    pub category: Option<u64>,
    #[serde(default)]
    pub category_name: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub max_score: u32,
    #[serde(default)]
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub id: u64,
    pub entry: String,
    #[serde(default)]
    pub category: Option<u64>,
    #[serde(default)]
    pub category_name: Option<String>,
    pub user: u64,
    pub created_at: DateTime<Utc>,
}

/// A judge's score sheet for one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeScore {
    pub id: u64,
    pub entry: String,
    #[serde(default)]
    pub category: Option<u64>,
    #[serde(default)]
    pub category_name: Option<String>,
    pub judge: super::JudgeSummary,
    pub total_score: u32,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub detailed_scores: Vec<DetailedScore>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Score against a single criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedScore {
    pub id: u64,
    pub judge_score: u64,
    pub criteria: u64,
    pub criteria_name: String,
    pub criteria_max_score: u32,
    pub score: u32,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ─── Request bodies ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateVoteRequest {
    pub entry: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateJudgeScoreRequest {
    pub entry: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub detailed_scores: Vec<DetailedScoreInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedScoreInput {
    pub criteria: u64,
    pub score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCategoryRequest {
    pub contest: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Serialized as `null` when unset so the server clears any limit
    pub max_votes_per_judge: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateJudgingCriteriaRequest {
    pub contest: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub max_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}
