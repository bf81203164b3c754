// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contest endpoints.

use super::entries::EntryOrdering;
use super::segment;
use crate::error::Result;
use crate::models::{
    Contest, ContestForm, ContestStatistics, Entry, JudgeSummary, Listing, User,
};
use crate::services::ApiClient;
use crate::transport::{ApiRequest, Transport};
use serde::{Deserialize, Serialize};

/// Response of the add/remove judge actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeChangeResponse {
    pub detail: String,
    #[serde(default)]
    pub judge: Option<JudgeSummary>,
}

pub struct ContestsApi<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> ContestsApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Contests visible to the caller (public ones, plus own when logged in).
    pub async fn list(&self) -> Result<Listing<Contest>> {
        self.client.get_json("/contests/").await
    }

    /// Contests created by the caller.
    pub async fn mine(&self) -> Result<Listing<Contest>> {
        self.client.get_json("/contests/my_contests/").await
    }

    /// Contests the caller judges.
    pub async fn judging(&self) -> Result<Listing<Contest>> {
        self.client.get_json("/contests/judging_contests/").await
    }

    pub async fn get(&self, slug: &str) -> Result<Contest> {
        self.client
            .get_json(&format!("/contests/{}/", segment(slug)))
            .await
    }

    pub async fn create(&self, form: ContestForm) -> Result<Contest> {
        self.client
            .fetch(ApiRequest::post("/contests/").multipart(form.into_multipart()))
            .await
    }

    /// Partial update; unset form fields are left alone.
    pub async fn update(&self, slug: &str, form: ContestForm) -> Result<Contest> {
        self.client
            .fetch(
                ApiRequest::patch(format!("/contests/{}/", segment(slug)))
                    .multipart(form.into_multipart()),
            )
            .await
    }

    pub async fn delete(&self, slug: &str) -> Result<()> {
        self.client
            .send(ApiRequest::delete(format!("/contests/{}/", segment(slug))))
            .await
    }

    /// Approved entries of a contest.
    pub async fn entries(
        &self,
        slug: &str,
        ordering: Option<EntryOrdering>,
        page: Option<u32>,
    ) -> Result<Listing<Entry>> {
        let request = ApiRequest::get(format!("/contests/{}/entries/", segment(slug)))
            .query_opt("ordering", ordering.map(|o| o.as_str()))
            .query_opt("page", page);
        self.client.fetch(request).await
    }

    pub async fn statistics(&self, slug: &str) -> Result<ContestStatistics> {
        self.client
            .get_json(&format!("/contests/{}/statistics/", segment(slug)))
            .await
    }

    /// Judges of a contest (owner, judges and staff only).
    pub async fn judges(&self, slug: &str) -> Result<Vec<User>> {
        self.client
            .get_json(&format!("/contests/{}/judges/", segment(slug)))
            .await
    }

    pub async fn add_judge(&self, slug: &str, user_id: u64) -> Result<JudgeChangeResponse> {
        let request = ApiRequest::post(format!("/contests/{}/add_judge/", segment(slug)))
            .json(&serde_json::json!({ "user_id": user_id }))?;
        self.client.fetch(request).await
    }

    pub async fn remove_judge(&self, slug: &str, user_id: u64) -> Result<JudgeChangeResponse> {
        let request = ApiRequest::post(format!("/contests/{}/remove_judge/", segment(slug)))
            .json(&serde_json::json!({ "user_id": user_id }))?;
        self.client.fetch(request).await
    }
}
