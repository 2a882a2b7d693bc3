//! Weather endpoints
//!
//! Every response is checked against its schema. A failed call is an error;
//! synthetic weather only exists in [`crate::mock::FixtureWeatherModel`].

use async_trait::async_trait;

use forecast_rust_schema::{WeatherAlert, WeatherCondition, WeatherForecast};

use crate::error::{logged, Result};
use crate::fetch::ApiClient;

#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// `GET /weather/current?lat&lon`
    async fn current(&self, lat: f64, lon: f64) -> Result<WeatherCondition>;

    /// `GET /weather/forecast?lat&lon`
    async fn forecast(&self, lat: f64, lon: f64) -> Result<WeatherForecast>;

    /// `GET /weather/alerts?lat&lon`
    async fn alerts(&self, lat: f64, lon: f64) -> Result<Vec<WeatherAlert>>;
}

/// Client for the weather endpoints
#[derive(Clone)]
pub struct WeatherModel {
    client: ApiClient,
}

impl WeatherModel {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WeatherApi for WeatherModel {
    async fn current(&self, lat: f64, lon: f64) -> Result<WeatherCondition> {
        self.client
            .get("/weather/current")
            .query("lat", lat)
            .query("lon", lon)
            .execute_validated()
            .await
            .map_err(logged("Failed to get current weather"))
    }

    async fn forecast(&self, lat: f64, lon: f64) -> Result<WeatherForecast> {
        self.client
            .get("/weather/forecast")
            .query("lat", lat)
            .query("lon", lon)
            .execute_validated()
            .await
            .map_err(logged("Failed to get weather forecast"))
    }

    async fn alerts(&self, lat: f64, lon: f64) -> Result<Vec<WeatherAlert>> {
        self.client
            .get("/weather/alerts")
            .query("lat", lat)
            .query("lon", lon)
            .execute_validated()
            .await
            .map_err(logged("Failed to get weather alerts"))
    }
}
