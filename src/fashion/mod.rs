//! Fashion recommendation endpoints

use async_trait::async_trait;

use forecast_rust_schema::{check, FashionRecommendation, Location, RecommendationRequest};

use crate::error::{logged, Result};
use crate::fetch::ApiClient;

#[async_trait]
pub trait FashionApi: Send + Sync {
    /// `POST /recommendations`
    async fn recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<FashionRecommendation>;

    /// `GET /fashion-recommendations?lat&lon&location`, public
    async fn recommendations_legacy(
        &self,
        lat: f64,
        lon: f64,
        location_name: &str,
    ) -> Result<FashionRecommendation>;

    /// `GET /recommendations/user`: history of the signed-in user
    async fn user_recommendations(&self) -> Result<Vec<FashionRecommendation>>;

    /// [`FashionApi::recommendations`] for a named point
    async fn recommendations_for_location(
        &self,
        location: &Location,
    ) -> Result<FashionRecommendation> {
        self.recommendations(&RecommendationRequest::from(location))
            .await
    }

    /// `POST /fashion/recommendations` with request and response schema checks
    async fn recommendations_validated(
        &self,
        request: &RecommendationRequest,
    ) -> Result<FashionRecommendation>;

    /// `GET /fashion/recommendations/location?lat&lon&name` with response schema check
    async fn recommendations_for_location_validated(
        &self,
        location: &Location,
    ) -> Result<FashionRecommendation>;
}

/// Client for the recommendation endpoints
#[derive(Clone)]
pub struct FashionModel {
    client: ApiClient,
}

impl FashionModel {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FashionApi for FashionModel {
    async fn recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<FashionRecommendation> {
        self.client
            .post("/recommendations")
            .json(request)?
            .execute()
            .await
            .map_err(logged("Failed to get fashion recommendations"))
    }

    async fn recommendations_legacy(
        &self,
        lat: f64,
        lon: f64,
        location_name: &str,
    ) -> Result<FashionRecommendation> {
        self.client
            .get("/fashion-recommendations")
            .auth(false)
            .query("lat", lat)
            .query("lon", lon)
            .query("location", location_name)
            .execute()
            .await
            .map_err(logged("Failed to get fashion recommendations"))
    }

    async fn user_recommendations(&self) -> Result<Vec<FashionRecommendation>> {
        self.client
            .get("/recommendations/user")
            .execute()
            .await
            .map_err(logged("Failed to get user recommendations"))
    }

    async fn recommendations_validated(
        &self,
        request: &RecommendationRequest,
    ) -> Result<FashionRecommendation> {
        let body = check(request)?;
        self.client
            .post("/fashion/recommendations")
            .json(&body)?
            .execute_validated()
            .await
            .map_err(logged("Failed to get fashion recommendations"))
    }

    async fn recommendations_for_location_validated(
        &self,
        location: &Location,
    ) -> Result<FashionRecommendation> {
        self.client
            .get("/fashion/recommendations/location")
            .query("lat", location.lat)
            .query("lon", location.lon)
            .query("name", &location.name)
            .execute_validated()
            .await
            .map_err(logged("Failed to get location recommendations"))
    }
}
