// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Entry endpoints, including voting and moderation actions.

use super::segment;
use crate::error::Result;
use crate::models::{Entry, EntryForm, Flag, Listing};
use crate::services::ApiClient;
use crate::transport::{ApiRequest, Transport};

/// Sort order accepted by the entry list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrdering {
    Newest,
    Oldest,
    MostVoted,
    LeastVoted,
}

impl EntryOrdering {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryOrdering::Newest => "-created_at",
            EntryOrdering::Oldest => "created_at",
            EntryOrdering::MostVoted => "-vote_count",
            EntryOrdering::LeastVoted => "vote_count",
        }
    }
}

/// Filters for `GET /entries/`.
#[derive(Debug, Clone, Default)]
pub struct EntryQuery {
    /// Contest slug
    pub contest: Option<String>,
    /// Author user id
    pub author: Option<u64>,
    pub ordering: Option<EntryOrdering>,
    pub page: Option<u32>,
}

impl EntryQuery {
    fn apply(self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("contest", self.contest)
            .query_opt("author", self.author)
            .query_opt("ordering", self.ordering.map(|o| o.as_str()))
            .query_opt("page", self.page)
    }
}

pub struct EntriesApi<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> EntriesApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: EntryQuery) -> Result<Listing<Entry>> {
        self.client
            .fetch(query.apply(ApiRequest::get("/entries/")))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Entry> {
        self.client
            .get_json(&format!("/entries/{}/", segment(id)))
            .await
    }

    pub async fn create(&self, form: EntryForm) -> Result<Entry> {
        self.client
            .fetch(ApiRequest::post("/entries/").multipart(form.into_multipart()))
            .await
    }

    pub async fn vote(&self, id: &str) -> Result<()> {
        self.action(ApiRequest::post(format!("/entries/{}/vote/", segment(id))))
            .await
    }

    pub async fn unvote(&self, id: &str) -> Result<()> {
        self.action(ApiRequest::delete(format!("/entries/{}/unvote/", segment(id))))
            .await
    }

    /// Report an entry to the moderators.
    pub async fn flag(&self, id: &str, reason: &str) -> Result<Flag> {
        let request = ApiRequest::post(format!("/entries/{}/flag/", segment(id)))
            .json(&serde_json::json!({ "reason": reason }))?;
        self.client.fetch(request).await
    }

    /// Legacy single-number judge score.
    pub async fn judge_score(&self, id: &str, score: u32, comment: &str) -> Result<()> {
        let request = ApiRequest::post(format!("/entries/{}/judge_score/", segment(id)))
            .json(&serde_json::json!({ "score": score, "comment": comment }))?;
        self.action(request).await
    }

    pub async fn approve(&self, id: &str) -> Result<()> {
        self.action(ApiRequest::post(format!("/entries/{}/approve/", segment(id))))
            .await
    }

    pub async fn reject(&self, id: &str) -> Result<()> {
        self.action(ApiRequest::post(format!("/entries/{}/reject/", segment(id))))
            .await
    }

    /// Moderation queue.
    pub async fn pending(&self) -> Result<Listing<Entry>> {
        self.client.get_json("/entries/pending/").await
    }

    async fn action(&self, request: ApiRequest) -> Result<()> {
        self.client.send(request).await
    }
}
