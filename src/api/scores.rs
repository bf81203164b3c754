//! Judge score endpoints.

use crate::error::Result;
use crate::models::{CreateJudgeScoreRequest, JudgeScore, Listing};
use crate::services::ApiClient;
use crate::transport::{ApiRequest, Transport};

/// Filters for `GET /judge-scores/`.
#[derive(Debug, Clone, Default)]
pub struct ScoreQuery {
    pub entry: Option<String>,
    pub category: Option<u64>,
    pub judge: Option<u64>,
    /// e.g. `-total_score`
    pub ordering: Option<String>,
}

pub struct ScoresApi<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> ScoresApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: ScoreQuery) -> Result<Listing<JudgeScore>> {
        let request = ApiRequest::get("/judge-scores/")
            .query_opt("entry", query.entry)
            .query_opt("category", query.category)
            .query_opt("judge", query.judge)
            .query_opt("ordering", query.ordering);
        self.client.fetch(request).await
    }

    pub async fn mine(&self) -> Result<Listing<JudgeScore>> {
        self.client.get_json("/judge-scores/my_scores/").await
    }

    pub async fn create(&self, body: &CreateJudgeScoreRequest) -> Result<JudgeScore> {
        self.client
            .fetch(ApiRequest::post("/judge-scores/").json(body)?)
            .await
    }

    pub async fn update(&self, id: u64, body: &CreateJudgeScoreRequest) -> Result<JudgeScore> {
        self.client
            .fetch(ApiRequest::patch(format!("/judge-scores/{}/", id)).json(body)?)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .send(ApiRequest::delete(format!("/judge-scores/{}/", id)))
            .await
    }
}
