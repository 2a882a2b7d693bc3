use std::sync::Arc;

use tokio::sync::RwLock;

use forecast_rust_schema::Location;

use super::RequestTracker;
use crate::error::Error;
use crate::location::{locate, FavoritesStore, Geocoder, PositionOptions, PositionProvider};

const SEARCH: &str = "search";

/// Name given to the device's own position
pub const CURRENT_LOCATION_NAME: &str = "現在地";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationState {
    /// Results of the last search
    pub locations: Vec<Location>,
    pub favorites: Vec<Location>,
    pub current_location: Option<Location>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Place search, device location and favorite places
pub struct LocationController {
    geocoder: Arc<dyn Geocoder>,
    position: Arc<dyn PositionProvider>,
    position_options: PositionOptions,
    favorites: FavoritesStore,
    state: Arc<RwLock<LocationState>>,
    tracker: RequestTracker,
}

impl LocationController {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        position: Arc<dyn PositionProvider>,
        position_options: PositionOptions,
        favorites: FavoritesStore,
    ) -> Self {
        Self {
            geocoder,
            position,
            position_options,
            favorites,
            state: Arc::new(RwLock::new(LocationState::default())),
            tracker: RequestTracker::new(),
        }
    }

    pub async fn state(&self) -> LocationState {
        let mut snapshot = self.state.read().await.clone();
        snapshot.is_loading = self.tracker.is_loading();
        snapshot
    }

    async fn start(&self) {
        self.state.write().await.error = None;
    }

    async fn fail(&self, err: Error, default: &str) {
        log::error!("{}: {}", default, err);
        self.state.write().await.error = Some(err.user_message(default));
    }

    /// Search places by name. A blank query clears the results without searching.
    pub async fn search(&self, query: &str) {
        if query.trim().is_empty() {
            self.tracker.ticket(SEARCH);
            self.state.write().await.locations.clear();
            return;
        }

        let _loading = self.tracker.begin();
        let ticket = self.tracker.ticket(SEARCH);
        self.start().await;
        let result = self.geocoder.search(query).await;
        if !self.tracker.is_current(ticket) {
            return;
        }
        match result {
            Ok(locations) => self.state.write().await.locations = locations,
            Err(err) => self.fail(err, "位置情報の検索に失敗しました").await,
        }
    }

    /// Resolve the device position into `current_location`
    pub async fn locate(&self) {
        let _loading = self.tracker.begin();
        self.start().await;
        match locate(self.position.as_ref(), &self.position_options).await {
            Ok(position) => {
                self.state.write().await.current_location = Some(Location::new(
                    position.latitude,
                    position.longitude,
                    CURRENT_LOCATION_NAME,
                ));
            }
            Err(err) => self.fail(err, "現在地の取得に失敗しました").await,
        }
    }

    pub async fn load_favorites(&self) {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.favorites.load() {
            Ok(favorites) => self.state.write().await.favorites = favorites,
            Err(err) => self.fail(err, "お気に入りの読み込みに失敗しました").await,
        }
    }

    pub async fn add_favorite(&self, location: &Location) {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.favorites.add(location) {
            Ok(favorites) => self.state.write().await.favorites = favorites,
            Err(err) => self.fail(err, "お気に入りの追加に失敗しました").await,
        }
    }

    /// Remove every favorite at the coordinates of `location`
    pub async fn remove_favorite(&self, location: &Location) {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.favorites.remove(location) {
            Ok(favorites) => self.state.write().await.favorites = favorites,
            Err(err) => self.fail(err, "お気に入りの削除に失敗しました").await,
        }
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }
}
