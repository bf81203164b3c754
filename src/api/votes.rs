//! Judge vote endpoints.

use crate::error::Result;
use crate::models::{CreateVoteRequest, Listing, Vote};
use crate::services::ApiClient;
use crate::transport::{ApiRequest, Transport};

/// Filters for `GET /votes/`.
#[derive(Debug, Clone, Default)]
pub struct VoteQuery {
    pub entry: Option<String>,
    pub category: Option<u64>,
    pub user: Option<u64>,
}

pub struct VotesApi<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> VotesApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: VoteQuery) -> Result<Listing<Vote>> {
        let request = ApiRequest::get("/votes/")
            .query_opt("entry", query.entry)
            .query_opt("category", query.category)
            .query_opt("user", query.user);
        self.client.fetch(request).await
    }

    pub async fn mine(&self) -> Result<Listing<Vote>> {
        self.client.get_json("/votes/my_votes/").await
    }

    pub async fn create(&self, body: &CreateVoteRequest) -> Result<Vote> {
        self.client
            .fetch(ApiRequest::post("/votes/").json(body)?)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .send(ApiRequest::delete(format!("/votes/{}/", id)))
            .await
    }
}
