#![allow(dead_code)]

use std::sync::Arc;

use forecast_rust::config::ClientOptions;
use forecast_rust::storage::MemoryStore;
use forecast_rust::Forecast;
use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";

// Helper to create a client against a mock server
pub fn setup_client(server_uri: &str) -> Forecast {
    Forecast::new_with_options(
        ClientOptions::default().with_base_url(server_uri),
        Arc::new(MemoryStore::new()),
    )
    .unwrap()
}

// Same, with a stored bearer token
pub fn signed_in_client(server_uri: &str) -> Forecast {
    let forecast = setup_client(server_uri);
    forecast.client().auth_storage().set_token(TOKEN).unwrap();
    forecast
}

pub fn user_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "テストユーザー",
        "email": "test@example.com",
        "preferences": {
            "styles": ["casual"],
            "colors": ["blue"],
            "preferredColors": ["blue"],
            "preferredBrands": ["Uniqlo"],
            "style": "casual"
        },
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

pub fn clothing_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "userId": "1",
        "name": name,
        "type": "shirt",
        "color": "white",
        "size": "M",
        "season": ["spring", "summer"],
        "description": null,
        "category": "tops",
        "brand": "Uniqlo",
        "warmthLevel": 2,
        "imageUrl": "https://img.example.com/shirt.png",
        "createdAt": "2024-03-01T10:00:00Z"
    })
}

pub fn weather_json() -> Value {
    json!({
        "temperature": 18.5,
        "feelsLike": 17.0,
        "description": "晴れ",
        "windDirection": 90,
        "visibility": 10,
        "uvIndex": 4,
        "condition": "sunny",
        "humidity": 45,
        "windSpeed": 2.5,
        "cloudCover": 5,
        "location": "東京",
        "dateTime": "2024-04-01T09:00:00Z",
        "pressure": 1015
    })
}

pub fn forecast_json() -> Value {
    let mut day = weather_json();
    day["date"] = json!("2024-04-02");
    json!({
        "location": { "lat": 35.6762, "lon": 139.6503 },
        "daily": [day],
        "hourly": [weather_json()],
        "lastUpdated": "2024-04-01T09:00:00Z"
    })
}

pub fn post_json(id: &str, likes: u32) -> Value {
    json!({
        "id": id,
        "userId": "1",
        "userName": "テストユーザー",
        "title": "春コーデ",
        "items": ["c1", "c2"],
        "description": "今日のコーデ",
        "tags": ["春コーデ"],
        "weather": weather_json(),
        "temperature": 18.5,
        "location": "東京",
        "imageUrl": "https://img.example.com/post.png",
        "createdAt": "2024-04-01T09:00:00Z",
        "likes": likes
    })
}

pub fn recommendation_json(id: &str, location: &str) -> Value {
    json!({
        "id": id,
        "userId": "1",
        "style": "casual",
        "items": [
            { "category": "tops", "name": "リネンシャツ", "color": "white", "reason": "暖かい日に" }
        ],
        "weather": weather_json(),
        "reason": "晴れて暖かいため",
        "location": location,
        "createdAt": "2024-04-01T09:00:00Z"
    })
}
