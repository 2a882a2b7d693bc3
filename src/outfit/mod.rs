//! Outfit post endpoints

mod builder;

use async_trait::async_trait;
use serde_json::json;

use forecast_rust_schema::{CreateOutfitPostRequest, OutfitPost, OutfitPostUpdate};

use crate::error::{logged, Result};
use crate::fetch::ApiClient;

pub use builder::*;

#[async_trait]
pub trait OutfitApi: Send + Sync {
    /// `GET /outfit-posts`, public
    async fn list_posts(&self) -> Result<Vec<OutfitPost>>;

    /// `GET /outfit-posts/{id}`, public
    async fn get_post(&self, id: &str) -> Result<OutfitPost>;

    /// `GET /outfit-posts/user/{id}`, public
    async fn user_posts(&self, user_id: &str) -> Result<Vec<OutfitPost>>;

    /// `GET /outfit-posts/user`: the signed-in user's posts
    async fn my_posts(&self) -> Result<Vec<OutfitPost>>;

    async fn create_post(&self, request: &CreateOutfitPostRequest) -> Result<OutfitPost>;

    async fn like_post(&self, id: &str) -> Result<OutfitPost>;

    async fn unlike_post(&self, id: &str) -> Result<OutfitPost>;

    async fn update_post(&self, id: &str, update: &OutfitPostUpdate) -> Result<OutfitPost>;

    async fn delete_post(&self, id: &str) -> Result<()>;
}

/// Client for the outfit post endpoints
#[derive(Clone)]
pub struct OutfitModel {
    client: ApiClient,
}

impl OutfitModel {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OutfitApi for OutfitModel {
    async fn list_posts(&self) -> Result<Vec<OutfitPost>> {
        self.client
            .get("/outfit-posts")
            .auth(false)
            .execute()
            .await
            .map_err(logged("Failed to get outfit posts"))
    }

    async fn get_post(&self, id: &str) -> Result<OutfitPost> {
        self.client
            .get(&format!("/outfit-posts/{}", id))
            .auth(false)
            .execute()
            .await
            .map_err(logged("Failed to get outfit post"))
    }

    async fn user_posts(&self, user_id: &str) -> Result<Vec<OutfitPost>> {
        self.client
            .get(&format!("/outfit-posts/user/{}", user_id))
            .auth(false)
            .execute()
            .await
            .map_err(logged("Failed to get user outfit posts by ID"))
    }

    async fn my_posts(&self) -> Result<Vec<OutfitPost>> {
        self.client
            .get("/outfit-posts/user")
            .execute()
            .await
            .map_err(logged("Failed to get user outfit posts"))
    }

    async fn create_post(&self, request: &CreateOutfitPostRequest) -> Result<OutfitPost> {
        self.client
            .post("/outfit-posts/create")
            .json(request)?
            .execute()
            .await
            .map_err(logged("Failed to create outfit post"))
    }

    async fn like_post(&self, id: &str) -> Result<OutfitPost> {
        self.client
            .post(&format!("/outfit-posts/{}/like", id))
            .json(&json!({}))?
            .execute()
            .await
            .map_err(logged("Failed to like outfit post"))
    }

    async fn unlike_post(&self, id: &str) -> Result<OutfitPost> {
        self.client
            .delete(&format!("/outfit-posts/{}/like", id))
            .execute()
            .await
            .map_err(logged("Failed to unlike outfit post"))
    }

    async fn update_post(&self, id: &str, update: &OutfitPostUpdate) -> Result<OutfitPost> {
        self.client
            .put(&format!("/outfit-posts/{}", id))
            .json(update)?
            .execute()
            .await
            .map_err(logged("Failed to update outfit post"))
    }

    async fn delete_post(&self, id: &str) -> Result<()> {
        self.client
            .delete(&format!("/outfit-posts/{}", id))
            .send()
            .await
            .map(|_| ())
            .map_err(logged("Failed to delete outfit post"))
    }
}
