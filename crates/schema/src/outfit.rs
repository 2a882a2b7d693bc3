//! Shared outfit posts

use serde::{Deserialize, Serialize};

use crate::schema::{Schema, Validated};
use crate::weather::WeatherCondition;

/// A shareable combination of closet items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitPost {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub title: String,
    /// Ids of the referenced clothing items
    pub items: Vec<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub weather: WeatherCondition,
    pub temperature: f64,
    pub location: String,
    pub image_url: String,
    pub created_at: String,
    pub likes: u32,
}

impl OutfitPost {
    /// Copy with one more like
    pub fn liked(&self) -> Self {
        Self {
            likes: self.likes.saturating_add(1),
            ..self.clone()
        }
    }

    /// Copy with one like removed, never going below zero
    pub fn unliked(&self) -> Self {
        Self {
            likes: self.likes.saturating_sub(1),
            ..self.clone()
        }
    }
}

impl Validated for OutfitPost {
    fn schema() -> Schema {
        Schema::object()
            .field("id", Schema::string())
            .field("userId", Schema::string())
            .field("userName", Schema::string())
            .field("title", Schema::string())
            .field("items", Schema::array(Schema::string()))
            .field("description", Schema::string())
            .field("tags", Schema::array(Schema::string()))
            .field("weather", WeatherCondition::schema())
            .field("temperature", Schema::number())
            .field("location", Schema::string())
            .field("imageUrl", Schema::string())
            .field("createdAt", Schema::string())
            .field("likes", Schema::number().int().min(0.0))
    }
}

/// Body of `POST /outfit-posts/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutfitPostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub items: Vec<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub weather: WeatherCondition,
    pub temperature: f64,
    pub location: String,
    pub image_url: String,
}

impl Validated for CreateOutfitPostRequest {
    fn schema() -> Schema {
        Schema::object()
            .optional("title", Schema::string())
            .field("items", Schema::array(Schema::string()))
            .field("description", Schema::string())
            .field("tags", Schema::array(Schema::string()))
            .field("weather", WeatherCondition::schema())
            .field("temperature", Schema::number())
            .field("location", Schema::string())
            .field("imageUrl", Schema::string().url())
    }
}

/// Partial update of a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitPostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(likes: u32) -> OutfitPost {
        OutfitPost {
            id: "p1".into(),
            user_id: "1".into(),
            user_name: "テストユーザー".into(),
            title: "雨の日".into(),
            items: vec!["c1".into()],
            description: "".into(),
            tags: vec![],
            weather: WeatherCondition {
                temperature: 12.0,
                feels_like: 10.0,
                description: "雨".into(),
                wind_direction: 0.0,
                visibility: 5.0,
                uv_index: 1.0,
                condition: "rainy".into(),
                humidity: 90.0,
                wind_speed: 4.0,
                cloud_cover: 100.0,
                location: "東京".into(),
                date_time: "2024-06-01T09:00:00Z".into(),
                pressure: 1002.0,
            },
            temperature: 12.0,
            location: "東京".into(),
            image_url: "".into(),
            created_at: "2024-06-01T09:00:00Z".into(),
            likes,
        }
    }

    #[test]
    fn test_like_then_unlike_restores_count() {
        let original = post(4);
        assert_eq!(original.liked().unliked().likes, 4);
    }

    #[test]
    fn test_unlike_clamps_at_zero() {
        assert_eq!(post(0).unliked().likes, 0);
    }
}
