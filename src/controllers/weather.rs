use std::sync::Arc;

use tokio::sync::RwLock;

use forecast_rust_schema::{Location, WeatherAlert, WeatherCondition, WeatherForecast};

use super::RequestTracker;
use crate::weather::WeatherApi;

const WEATHER: &str = "weather";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherState {
    pub current: Option<WeatherCondition>,
    pub forecast: Option<WeatherForecast>,
    pub alerts: Vec<WeatherAlert>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Location of the most recent request, used by `refresh`
    pub last_location: Option<Location>,
}

pub struct WeatherController<W: WeatherApi> {
    api: W,
    state: Arc<RwLock<WeatherState>>,
    tracker: RequestTracker,
}

impl<W: WeatherApi> WeatherController<W> {
    pub fn new(api: W) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(WeatherState::default())),
            tracker: RequestTracker::new(),
        }
    }

    pub async fn state(&self) -> WeatherState {
        let mut snapshot = self.state.read().await.clone();
        snapshot.is_loading = self.tracker.is_loading();
        snapshot
    }

    /// Fetch current weather, forecast and alerts for `location` concurrently.
    ///
    /// All three are applied together; if any call fails none is.
    pub async fn weather_for_location(&self, location: &Location) {
        let _loading = self.tracker.begin();
        let ticket = self.tracker.ticket(WEATHER);
        {
            let mut state = self.state.write().await;
            state.error = None;
            state.last_location = Some(location.clone());
        }

        let result = tokio::try_join!(
            self.api.current(location.lat, location.lon),
            self.api.forecast(location.lat, location.lon),
            self.api.alerts(location.lat, location.lon),
        );
        if !self.tracker.is_current(ticket) {
            return;
        }

        let mut state = self.state.write().await;
        match result {
            Ok((current, forecast, alerts)) => {
                state.current = Some(current);
                state.forecast = Some(forecast);
                state.alerts = alerts;
            }
            Err(err) => {
                log::error!("Weather fetch failed: {}", err);
                state.error = Some(err.user_message("天気データの取得に失敗しました"));
            }
        }
    }

    /// Same as [`Self::weather_for_location`], naming the place after its coordinates
    pub async fn weather_for_coords(&self, lat: f64, lon: f64) {
        let location = Location::new(lat, lon, format!("{:.2}, {:.2}", lat, lon));
        self.weather_for_location(&location).await
    }

    /// Repeat the last request; does nothing before the first one
    pub async fn refresh(&self) {
        let last = self.state.read().await.last_location.clone();
        if let Some(location) = last {
            self.weather_for_location(&location).await;
        }
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::FixtureWeatherModel;

    #[tokio::test]
    async fn test_coords_are_named_and_refreshable() {
        let controller = WeatherController::new(FixtureWeatherModel::new());
        controller.refresh().await;
        assert!(controller.state().await.current.is_none());

        controller.weather_for_coords(35.6762, 139.6503).await;
        let state = controller.state().await;
        assert_eq!(state.last_location.unwrap().name, "35.68, 139.65");
        assert!(state.current.is_some());
        assert_eq!(state.forecast.unwrap().daily.len(), 5);
        assert!(!state.is_loading);
        assert!(state.error.is_none());

        controller.refresh().await;
        assert!(controller.state().await.current.is_some());
    }
}
