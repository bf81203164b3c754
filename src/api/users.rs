//! User endpoints.

use crate::error::Result;
use crate::models::{Listing, ProfileForm, User};
use crate::services::ApiClient;
use crate::transport::{ApiRequest, Transport};

pub struct UsersApi<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> UsersApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Listing<User>> {
        self.client.get_json("/users/").await
    }

    pub async fn get(&self, id: u64) -> Result<User> {
        self.client.get_json(&format!("/users/{}/", id)).await
    }

    pub async fn me(&self) -> Result<User> {
        self.client.get_json("/users/me/").await
    }

    pub async fn update_me(&self, form: ProfileForm) -> Result<User> {
        self.client
            .fetch(ApiRequest::patch("/users/update_me/").multipart(form.into_multipart()))
            .await
    }

    /// Use the linked Twitter avatar as the profile picture.
    pub async fn set_twitter_icon(&self) -> Result<()> {
        self.client
            .send(ApiRequest::post("/users/set_twitter_icon/"))
            .await
    }
}
