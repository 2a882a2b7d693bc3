use std::sync::Arc;

use tokio::sync::RwLock;

use forecast_rust_schema::{ClothingItem, CreateOutfitPostRequest, OutfitPost, OutfitPostUpdate};

use super::{replace_by_id, RequestTracker};
use crate::error::Error;
use crate::filters::OutfitFilters;
use crate::outfit::OutfitApi;

const POSTS: &str = "posts";
const USER_POSTS: &str = "user_posts";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutfitState {
    /// Public timeline
    pub posts: Vec<OutfitPost>,
    /// Posts of the user whose profile is open
    pub user_posts: Vec<OutfitPost>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: Option<OutfitPost>,
    /// Outfit being composed, at most one item per category
    pub current_outfit: Vec<ClothingItem>,
    pub filters: OutfitFilters,
}

/// Timeline, profile posts, likes and the outfit being composed
pub struct OutfitController<O: OutfitApi> {
    api: O,
    state: Arc<RwLock<OutfitState>>,
    tracker: RequestTracker,
}

impl<O: OutfitApi> OutfitController<O> {
    pub fn new(api: O) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(OutfitState::default())),
            tracker: RequestTracker::new(),
        }
    }

    pub async fn state(&self) -> OutfitState {
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

    pub async fn load_posts(&self) {
        let _loading = self.tracker.begin();
        let ticket = self.tracker.ticket(POSTS);
        self.start().await;
        let result = self.api.list_posts().await;
        if !self.tracker.is_current(ticket) {
            return;
        }
        match result {
            Ok(posts) => self.state.write().await.posts = posts,
            Err(err) => self.fail(err, "投稿読み込み").await,
        }
    }

    pub async fn refresh_posts(&self) {
        self.load_posts().await
    }

    pub async fn load_user_posts(&self, user_id: &str) {
        let _loading = self.tracker.begin();
        let ticket = self.tracker.ticket(USER_POSTS);
        self.start().await;
        let result = self.api.user_posts(user_id).await;
        if !self.tracker.is_current(ticket) {
            return;
        }
        match result {
            Ok(posts) => self.state.write().await.user_posts = posts,
            Err(err) => self.fail(err, "ユーザー投稿読み込み").await,
        }
    }

    /// Publish a post; it is prepended to both lists. Returns whether it succeeded.
    pub async fn create_post(&self, request: &CreateOutfitPostRequest) -> bool {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.api.create_post(request).await {
            Ok(post) => {
                let mut state = self.state.write().await;
                state.posts.insert(0, post.clone());
                state.user_posts.insert(0, post);
                true
            }
            Err(err) => {
                self.fail(err, "投稿作成").await;
                false
            }
        }
    }

    pub async fn update_post(&self, id: &str, update: &OutfitPostUpdate) {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.api.update_post(id, update).await {
            Ok(updated) => {
                let mut state = self.state.write().await;
                replace_by_id(&mut state.posts, id, &updated, |p| &p.id);
                replace_by_id(&mut state.user_posts, id, &updated, |p| &p.id);
                if state.selected.as_ref().map_or(false, |p| p.id == id) {
                    state.selected = Some(updated);
                }
            }
            Err(err) => self.fail(err, "投稿更新").await,
        }
    }

    pub async fn delete_post(&self, id: &str) {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.api.delete_post(id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.posts.retain(|p| p.id != id);
                state.user_posts.retain(|p| p.id != id);
                if state.selected.as_ref().map_or(false, |p| p.id == id) {
                    state.selected = None;
                }
            }
            Err(err) => self.fail(err, "投稿削除").await,
        }
    }

    async fn adjust_likes(&self, id: &str, adjust: fn(&OutfitPost) -> OutfitPost) {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        for post in state.posts.iter_mut().chain(state.user_posts.iter_mut()) {
            if post.id == id {
                *post = adjust(post);
            }
        }
    }

    /// Like a post and count it locally in both lists. Does not touch `loading`.
    pub async fn like_post(&self, id: &str) {
        match self.api.like_post(id).await {
            Ok(_) => self.adjust_likes(id, OutfitPost::liked).await,
            Err(err) => self.fail(err, "いいね").await,
        }
    }

    /// Withdraw a like; counts never drop below zero
    pub async fn unlike_post(&self, id: &str) {
        match self.api.unlike_post(id).await {
            Ok(_) => self.adjust_likes(id, OutfitPost::unliked).await,
            Err(err) => self.fail(err, "いいね取り消し").await,
        }
    }

    pub async fn select(&self, post: Option<OutfitPost>) {
        self.state.write().await.selected = post;
    }

    /// Add `item`, replacing any item of the same category
    pub async fn add_to_current_outfit(&self, item: ClothingItem) {
        let mut state = self.state.write().await;
        state
            .current_outfit
            .retain(|existing| existing.category != item.category);
        state.current_outfit.push(item);
    }

    pub async fn remove_from_current_outfit(&self, item_id: &str) {
        self.state
            .write()
            .await
            .current_outfit
            .retain(|item| item.id != item_id);
    }

    pub async fn clear_current_outfit(&self) {
        self.state.write().await.current_outfit.clear();
    }

    pub async fn update_filters(&self, update: impl FnOnce(&mut OutfitFilters)) {
        update(&mut self.state.write().await.filters);
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Timeline posts passing the stored filters, in the stored order
    pub async fn filtered_posts(&self) -> Vec<OutfitPost> {
        let state = self.state.read().await;
        state.filters.apply(&state.posts)
    }
}
