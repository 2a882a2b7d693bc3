//! Server-generated outfit recommendations

use serde::{Deserialize, Serialize};

use crate::location::Location;
use crate::schema::{Schema, Validated};
use crate::weather::WeatherCondition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedItem {
    pub category: String,
    pub name: String,
    pub color: String,
    pub reason: String,
}

impl Validated for RecommendedItem {
    fn schema() -> Schema {
        Schema::object()
            .field("category", Schema::string())
            .field("name", Schema::string())
            .field("color", Schema::string())
            .field("reason", Schema::string())
    }
}

/// おすすめコーディネート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FashionRecommendation {
    pub id: String,
    pub user_id: String,
    pub style: String,
    pub items: Vec<RecommendedItem>,
    pub weather: WeatherCondition,
    pub reason: String,
    pub location: String,
    pub created_at: String,
}

impl Validated for FashionRecommendation {
    fn schema() -> Schema {
        Schema::object()
            .field("id", Schema::string())
            .field("userId", Schema::string())
            .field("style", Schema::string())
            .field("items", Schema::array(RecommendedItem::schema()))
            .field("weather", WeatherCondition::schema())
            .field("reason", Schema::string())
            .field("location", Schema::string())
            .field("createdAt", Schema::string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub location: String,
}

impl From<&Location> for RecommendationRequest {
    fn from(location: &Location) -> Self {
        Self {
            user_id: None,
            latitude: location.lat,
            longitude: location.lon,
            location: location.name.clone(),
        }
    }
}

impl Validated for RecommendationRequest {
    fn schema() -> Schema {
        Schema::object()
            .optional("userId", Schema::string())
            .field("latitude", Schema::number())
            .field("longitude", Schema::number())
            .field("location", Schema::string())
    }
}
