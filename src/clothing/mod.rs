//! Closet endpoints

use async_trait::async_trait;
use serde_json::Value;

use forecast_rust_schema::{
    check, ClothingItem, ClothingUpdate, CreateClothingRequest, NewClothingItem,
};

use crate::error::{logged, Result};
use crate::fetch::ApiClient;

#[async_trait]
pub trait ClothingApi: Send + Sync {
    /// `GET /clothing/`: the signed-in user's items
    async fn list_items(&self) -> Result<Vec<ClothingItem>>;

    /// `GET /clothing/user/{id}`, public
    async fn user_items(&self, user_id: &str) -> Result<Vec<ClothingItem>>;

    async fn get_item(&self, id: &str) -> Result<ClothingItem>;

    /// `POST /clothing` with a full item
    async fn add_item(&self, item: &NewClothingItem) -> Result<ClothingItem>;

    /// `POST /clothing` with the minimal create payload
    async fn create_item(&self, request: &CreateClothingRequest) -> Result<ClothingItem>;

    async fn update_item(&self, id: &str, update: &ClothingUpdate) -> Result<ClothingItem>;

    async fn delete_item(&self, id: &str) -> Result<()>;

    /// `GET /clothing/items` with response schema check
    async fn list_items_validated(&self) -> Result<Vec<ClothingItem>>;

    /// Checks the create payload before any request, then `POST /clothing/items`
    async fn add_item_validated(&self, item: &NewClothingItem) -> Result<ClothingItem>;

    /// `PUT /clothing/items/{id}` with response schema check
    async fn update_item_validated(&self, id: &str, update: &ClothingUpdate)
        -> Result<ClothingItem>;
}

/// Client for the closet endpoints
#[derive(Clone)]
pub struct ClothingModel {
    client: ApiClient,
}

impl ClothingModel {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

/// Merge the validated create fields over the full item payload
fn merged_create_body(item: &NewClothingItem) -> Result<Value> {
    let mut body = check(&item.create_request())?;
    if let (Value::Object(target), Value::Object(extra)) = (&mut body, serde_json::to_value(item)?) {
        target.extend(extra);
    }
    Ok(body)
}

#[async_trait]
impl ClothingApi for ClothingModel {
    async fn list_items(&self) -> Result<Vec<ClothingItem>> {
        self.client
            .get("/clothing/")
            .execute()
            .await
            .map_err(logged("Failed to get clothing items"))
    }

    async fn user_items(&self, user_id: &str) -> Result<Vec<ClothingItem>> {
        self.client
            .get(&format!("/clothing/user/{}", user_id))
            .auth(false)
            .execute()
            .await
            .map_err(logged("Failed to get user items"))
    }

    async fn get_item(&self, id: &str) -> Result<ClothingItem> {
        self.client
            .get(&format!("/clothing/{}", id))
            .execute()
            .await
            .map_err(logged("Failed to get clothing item"))
    }

    async fn add_item(&self, item: &NewClothingItem) -> Result<ClothingItem> {
        self.client
            .post("/clothing")
            .json(item)?
            .execute()
            .await
            .map_err(logged("Failed to add clothing item"))
    }

    async fn create_item(&self, request: &CreateClothingRequest) -> Result<ClothingItem> {
        self.client
            .post("/clothing")
            .json(request)?
            .execute()
            .await
            .map_err(logged("Failed to create clothing item"))
    }

    async fn update_item(&self, id: &str, update: &ClothingUpdate) -> Result<ClothingItem> {
        self.client
            .put(&format!("/clothing/{}", id))
            .json(update)?
            .execute()
            .await
            .map_err(logged("Failed to update clothing item"))
    }

    async fn delete_item(&self, id: &str) -> Result<()> {
        self.client
            .delete(&format!("/clothing/{}", id))
            .send()
            .await
            .map(|_| ())
            .map_err(logged("Failed to delete clothing item"))
    }

    async fn list_items_validated(&self) -> Result<Vec<ClothingItem>> {
        self.client
            .get("/clothing/items")
            .execute_validated()
            .await
            .map_err(logged("Failed to get clothing items"))
    }

    async fn add_item_validated(&self, item: &NewClothingItem) -> Result<ClothingItem> {
        let body = merged_create_body(item).map_err(logged("Invalid clothing item"))?;
        self.client
            .post("/clothing/items")
            .json(&body)?
            .execute_validated()
            .await
            .map_err(logged("Failed to add clothing item"))
    }

    async fn update_item_validated(
        &self,
        id: &str,
        update: &ClothingUpdate,
    ) -> Result<ClothingItem> {
        self.client
            .put(&format!("/clothing/items/{}", id))
            .json(update)?
            .execute_validated()
            .await
            .map_err(logged("Failed to update clothing item"))
    }
}
