//! Judging criteria endpoints.

use crate::error::Result;
use crate::models::{CreateJudgingCriteriaRequest, JudgingCriteria, Listing};
use crate::services::ApiClient;
use crate::transport::{ApiRequest, Transport};

pub struct CriteriaApi<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> CriteriaApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Criteria of a contest, optionally narrowed to one category.
    pub async fn list(
        &self,
        contest_id: u64,
        category_id: Option<u64>,
    ) -> Result<Listing<JudgingCriteria>> {
        let request = ApiRequest::get("/judging-criteria/")
            .query("contest", contest_id)
            .query_opt("category", category_id);
        self.client.fetch(request).await
    }

    pub async fn create(&self, body: &CreateJudgingCriteriaRequest) -> Result<JudgingCriteria> {
        self.client
            .fetch(ApiRequest::post("/judging-criteria/").json(body)?)
            .await
    }

    pub async fn update(
        &self,
        id: u64,
        body: &CreateJudgingCriteriaRequest,
    ) -> Result<JudgingCriteria> {
        self.client
            .fetch(ApiRequest::patch(format!("/judging-criteria/{}/", id)).json(body)?)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .send(ApiRequest::delete(format!("/judging-criteria/{}/", id)))
            .await
    }
}
