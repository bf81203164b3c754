//! Award category endpoints.

use crate::error::Result;
use crate::models::{Category, CreateCategoryRequest, Listing};
use crate::services::ApiClient;
use crate::transport::{ApiRequest, Transport};

pub struct CategoriesApi<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> CategoriesApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Categories of one contest (by contest id), in display order.
    pub async fn list(&self, contest_id: u64) -> Result<Listing<Category>> {
        let request = ApiRequest::get("/categories/")
            .query("contest", contest_id)
            .query("ordering", "order");
        self.client.fetch(request).await
    }

    pub async fn create(&self, body: &CreateCategoryRequest) -> Result<Category> {
        self.client
            .fetch(ApiRequest::post("/categories/").json(body)?)
            .await
    }

    pub async fn update(&self, id: u64, body: &CreateCategoryRequest) -> Result<Category> {
        self.client
            .fetch(ApiRequest::patch(format!("/categories/{}/", id)).json(body)?)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .send(ApiRequest::delete(format!("/categories/{}/", id)))
            .await
    }
}
