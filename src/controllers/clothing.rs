use std::sync::Arc;

use tokio::sync::RwLock;

use forecast_rust_schema::{ClothingCategory, ClothingItem, ClothingUpdate, NewClothingItem};

use super::{replace_by_id, RequestTracker};
use crate::catalog::clothing_categories;
use crate::clothing::ClothingApi;
use crate::error::{Error, Result};
use crate::filters::ClothingStats;

const ITEMS: &str = "items";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClothingState {
    pub items: Vec<ClothingItem>,
    pub categories: Vec<ClothingCategory>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: Option<ClothingItem>,
}

/// Closet state: the item list, the categories and the selected item
pub struct ClothingController<C: ClothingApi> {
    api: C,
    state: Arc<RwLock<ClothingState>>,
    tracker: RequestTracker,
}

impl<C: ClothingApi> ClothingController<C> {
    pub fn new(api: C) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(ClothingState::default())),
            tracker: RequestTracker::new(),
        }
    }

    pub async fn state(&self) -> ClothingState {
        let mut snapshot = self.state.read().await.clone();
        snapshot.loading = self.tracker.is_loading();
        snapshot
    }

    async fn start(&self) {
        self.state.write().await.error = None;
    }

    async fn fail(&self, err: Error, operation: &str) {
        log::error!("{} error: {}", operation, err);
        let message = err.user_message(&format!("{}に失敗しました", operation));
        self.state.write().await.error = Some(message);
    }

    async fn load_with<F>(&self, operation: &str, load: F)
    where
        F: std::future::Future<Output = Result<Vec<ClothingItem>>>,
    {
        let _loading = self.tracker.begin();
        let ticket = self.tracker.ticket(ITEMS);
        self.start().await;
        match load.await {
            Ok(items) => {
                if self.tracker.is_current(ticket) {
                    self.state.write().await.items = items;
                }
            }
            Err(err) => {
                if self.tracker.is_current(ticket) {
                    self.fail(err, operation).await;
                }
            }
        }
    }

    /// Load the signed-in user's closet
    pub async fn load_items(&self) {
        self.load_with("アイテム読み込み", self.api.list_items())
            .await
    }

    pub async fn load_items_validated(&self) {
        self.load_with("アイテム読み込み", self.api.list_items_validated())
            .await
    }

    /// Load another user's public closet into `items`
    pub async fn load_user_items(&self, user_id: &str) {
        self.load_with("ユーザーアイテム読み込み", self.api.user_items(user_id))
            .await
    }

    pub async fn load_categories(&self) {
        let _loading = self.tracker.begin();
        self.start().await;
        self.state.write().await.categories = clothing_categories();
    }

    async fn appended(&self, result: Result<ClothingItem>) {
        match result {
            Ok(item) => self.state.write().await.items.push(item),
            Err(err) => self.fail(err, "アイテム追加").await,
        }
    }

    pub async fn add_item(&self, item: &NewClothingItem) {
        let _loading = self.tracker.begin();
        self.start().await;
        let result = self.api.add_item(item).await;
        self.appended(result).await;
    }

    /// Validate the item, then add it; invalid items never reach the backend
    pub async fn add_item_validated(&self, item: &NewClothingItem) {
        let _loading = self.tracker.begin();
        self.start().await;
        let result = self.api.add_item_validated(item).await;
        self.appended(result).await;
    }

    async fn replaced(&self, id: &str, result: Result<ClothingItem>) {
        match result {
            Ok(updated) => {
                let mut state = self.state.write().await;
                replace_by_id(&mut state.items, id, &updated, |i| &i.id);
                if state.selected.as_ref().map_or(false, |s| s.id == id) {
                    state.selected = Some(updated);
                }
            }
            Err(err) => self.fail(err, "アイテム更新").await,
        }
    }

    pub async fn update_item(&self, id: &str, update: &ClothingUpdate) {
        let _loading = self.tracker.begin();
        self.start().await;
        let result = self.api.update_item(id, update).await;
        self.replaced(id, result).await;
    }

    pub async fn update_item_validated(&self, id: &str, update: &ClothingUpdate) {
        let _loading = self.tracker.begin();
        self.start().await;
        let result = self.api.update_item_validated(id, update).await;
        self.replaced(id, result).await;
    }

    pub async fn delete_item(&self, id: &str) {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.api.delete_item(id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.items.retain(|item| item.id != id);
                if state.selected.as_ref().map_or(false, |s| s.id == id) {
                    state.selected = None;
                }
            }
            Err(err) => self.fail(err, "アイテム削除").await,
        }
    }

    pub async fn select(&self, item: Option<ClothingItem>) {
        self.state.write().await.selected = item;
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Counts over the loaded items
    pub async fn stats(&self) -> ClothingStats {
        ClothingStats::from_items(&self.state.read().await.items)
    }
}
