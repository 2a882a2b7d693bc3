use std::sync::Arc;

use tokio::sync::RwLock;

use forecast_rust_schema::{FashionRecommendation, Location, RecommendationRequest};

use super::{RequestTracker, Ticket};
use crate::error::{Error, Result};
use crate::fashion::FashionApi;
use crate::location::{locate, Geocoder, PositionOptions, PositionProvider, UNKNOWN_PLACE};

const RECOMMENDATION: &str = "recommendation";
const HISTORY: &str = "history";

/// Coordinates used when only a place name is known (Tokyo)
pub const DEFAULT_COORDINATES: (f64, f64) = (35.6762, 139.6503);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FashionState {
    pub current_recommendation: Option<FashionRecommendation>,
    pub user_recommendations: Vec<FashionRecommendation>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Where the current recommendation was computed for
    pub current_location: Option<Location>,
}

/// おすすめコーディネートの取得と履歴を管理するコントローラー
pub struct FashionController<F: FashionApi> {
    api: F,
    position: Arc<dyn PositionProvider>,
    geocoder: Arc<dyn Geocoder>,
    position_options: PositionOptions,
    state: Arc<RwLock<FashionState>>,
    tracker: RequestTracker,
}

impl<F: FashionApi> FashionController<F> {
    pub fn new(
        api: F,
        position: Arc<dyn PositionProvider>,
        geocoder: Arc<dyn Geocoder>,
        position_options: PositionOptions,
    ) -> Self {
        Self {
            api,
            position,
            geocoder,
            position_options,
            state: Arc::new(RwLock::new(FashionState::default())),
            tracker: RequestTracker::new(),
        }
    }

    pub async fn state(&self) -> FashionState {
        let mut snapshot = self.state.read().await.clone();
        snapshot.is_loading = self.tracker.is_loading();
        snapshot
    }

    pub async fn current_location(&self) -> Option<Location> {
        self.state.read().await.current_location.clone()
    }

    pub async fn current_recommendation(&self) -> Option<FashionRecommendation> {
        self.state.read().await.current_recommendation.clone()
    }

    async fn start(&self) {
        self.state.write().await.error = None;
    }

    async fn fail(&self, err: Error, default: &str) -> Error {
        log::error!("{}: {}", default, err);
        self.state.write().await.error = Some(err.user_message(default));
        err
    }

    /// Store a recommendation if `ticket` is still the newest request
    async fn apply(
        &self,
        ticket: Ticket,
        result: Result<FashionRecommendation>,
        location: Option<Location>,
        default: &str,
    ) -> Result<()> {
        if !self.tracker.is_current(ticket) {
            return Ok(());
        }
        match result {
            Ok(recommendation) => {
                let mut state = self.state.write().await;
                state.current_recommendation = Some(recommendation);
                if location.is_some() {
                    state.current_location = location;
                }
                Ok(())
            }
            Err(err) => Err(self.fail(err, default).await),
        }
    }

    pub async fn recommendations(&self, request: &RecommendationRequest) -> Result<()> {
        let _loading = self.tracker.begin();
        let ticket = self.tracker.ticket(RECOMMENDATION);
        self.start().await;
        let result = self.api.recommendations(request).await;
        self.apply(ticket, result, None, "おすすめの取得に失敗しました")
            .await
    }

    /// Recommendations for a chosen place; `None` does nothing
    pub async fn recommendations_for_location(&self, location: Option<&Location>) -> Result<()> {
        let _loading = self.tracker.begin();
        self.start().await;
        let location = match location {
            Some(location) => location,
            None => return Ok(()),
        };
        let ticket = self.tracker.ticket(RECOMMENDATION);
        let result = self.api.recommendations_for_location(location).await;
        self.apply(
            ticket,
            result,
            Some(location.clone()),
            "指定地点のおすすめ取得に失敗しました",
        )
        .await
    }

    async fn locate_named(&self) -> Result<Location> {
        let position = locate(self.position.as_ref(), &self.position_options).await?;

        let name = match self
            .geocoder
            .reverse(position.latitude, position.longitude)
            .await
        {
            Ok(name) if !name.trim().is_empty() => name,
            Ok(_) => UNKNOWN_PLACE.to_string(),
            Err(err) => {
                log::error!("Failed to get location name: {}", err);
                UNKNOWN_PLACE.to_string()
            }
        };
        Ok(Location::new(position.latitude, position.longitude, name))
    }

    /// Locate the device, name the place, then fetch recommendations for it
    pub async fn recommendations_for_current_location(&self) -> Result<()> {
        let _loading = self.tracker.begin();
        let ticket = self.tracker.ticket(RECOMMENDATION);
        self.start().await;

        const DEFAULT: &str = "現在地のおすすめ取得に失敗しました";
        let location = match self.locate_named().await {
            Ok(location) => location,
            Err(err) => return Err(self.fail(err, DEFAULT).await),
        };
        let result = self.api.recommendations_for_location(&location).await;
        self.apply(ticket, result, Some(location), DEFAULT).await
    }

    /// Recommendations for a place known only by name, at [`DEFAULT_COORDINATES`]
    pub async fn load_current_weather(&self, location_name: &str) {
        let (lat, lon) = DEFAULT_COORDINATES;
        let location = Location::new(lat, lon, location_name);
        if let Err(err) = self.recommendations_for_location(Some(&location)).await {
            log::debug!("Recommendations for {} failed: {}", location_name, err);
        }
    }

    pub async fn user_recommendations(&self) -> Result<()> {
        let _loading = self.tracker.begin();
        let ticket = self.tracker.ticket(HISTORY);
        self.start().await;
        let result = self.api.user_recommendations().await;
        if !self.tracker.is_current(ticket) {
            return Ok(());
        }
        match result {
            Ok(history) => {
                self.state.write().await.user_recommendations = history;
                Ok(())
            }
            Err(err) => Err(self.fail(err, "おすすめ履歴の取得に失敗しました").await),
        }
    }

    /// Repeat for the stored location, or for the device position when none is stored
    pub async fn refresh(&self) -> Result<()> {
        match self.current_location().await {
            Some(location) => self.recommendations_for_location(Some(&location)).await,
            None => self.recommendations_for_current_location().await,
        }
    }

    pub async fn recommendations_validated(&self, request: &RecommendationRequest) -> Result<()> {
        let _loading = self.tracker.begin();
        let ticket = self.tracker.ticket(RECOMMENDATION);
        self.start().await;
        let result = self.api.recommendations_validated(request).await;
        self.apply(ticket, result, None, "おすすめの取得に失敗しました")
            .await
    }

    pub async fn recommendations_for_location_validated(&self, location: &Location) -> Result<()> {
        let _loading = self.tracker.begin();
        let ticket = self.tracker.ticket(RECOMMENDATION);
        self.start().await;
        let result = self
            .api
            .recommendations_for_location_validated(location)
            .await;
        self.apply(
            ticket,
            result,
            Some(location.clone()),
            "指定地点のおすすめ取得に失敗しました",
        )
        .await
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Forget the recommendation, the history and the location
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.current_recommendation = None;
        state.user_recommendations.clear();
        state.current_location = None;
    }
}
