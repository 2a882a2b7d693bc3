//! Weather snapshots. The client never mutates these.

use serde::{Deserialize, Serialize};

use crate::schema::{Schema, Validated};

/// Weather at one place and time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherCondition {
    pub temperature: f64,
    pub feels_like: f64,
    pub description: String,
    pub wind_direction: f64,
    pub visibility: f64,
    pub uv_index: f64,
    pub condition: String,
    pub humidity: f64,
    pub wind_speed: f64,
    pub cloud_cover: f64,
    pub location: String,
    pub date_time: String,
    pub pressure: f64,
}

impl Validated for WeatherCondition {
    fn schema() -> Schema {
        Schema::object()
            .field("temperature", Schema::number())
            .field("feelsLike", Schema::number())
            .field("description", Schema::string())
            .field("windDirection", Schema::number())
            .field("visibility", Schema::number())
            .field("uvIndex", Schema::number())
            .field("condition", Schema::string())
            .field("humidity", Schema::number())
            .field("windSpeed", Schema::number())
            .field("cloudCover", Schema::number())
            .field("location", Schema::string())
            .field("dateTime", Schema::string())
            .field("pressure", Schema::number())
    }
}

/// One day of a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecastDaily {
    pub date: String,
    #[serde(flatten)]
    pub condition: WeatherCondition,
}

impl Validated for WeatherForecastDaily {
    fn schema() -> Schema {
        WeatherCondition::schema().extend(Schema::object().field("date", Schema::string()))
    }
}

/// Coordinates a forecast was computed for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    pub location: Coordinates,
    pub daily: Vec<WeatherForecastDaily>,
    pub hourly: Vec<WeatherCondition>,
    pub last_updated: String,
}

impl Validated for WeatherForecast {
    fn schema() -> Schema {
        Schema::object()
            .field(
                "location",
                Schema::object()
                    .field("lat", Schema::number())
                    .field("lon", Schema::number()),
            )
            .field("daily", Schema::array(WeatherForecastDaily::schema()))
            .field("hourly", Schema::array(WeatherCondition::schema()))
            .field("lastUpdated", Schema::string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Watch,
    Advisory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

/// 気象警報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherAlert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub title: String,
    pub description: String,
    pub severity: AlertSeverity,
}

impl Validated for WeatherAlert {
    fn schema() -> Schema {
        Schema::object()
            .field("type", Schema::one_of(&["warning", "watch", "advisory"]))
            .field("title", Schema::string())
            .field("description", Schema::string())
            .field("severity", Schema::one_of(&["low", "medium", "high"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parse;
    use serde_json::json;

    pub(crate) fn condition_json() -> serde_json::Value {
        json!({
            "temperature": 21.5,
            "feelsLike": 20.0,
            "description": "晴れ",
            "windDirection": 180,
            "visibility": 10,
            "uvIndex": 5,
            "condition": "sunny",
            "humidity": 55,
            "windSpeed": 3.2,
            "cloudCover": 10,
            "location": "東京",
            "dateTime": "2024-05-01T09:00:00Z",
            "pressure": 1013
        })
    }

    #[test]
    fn test_daily_forecast_flattens_condition() {
        let mut day = condition_json();
        day["date"] = json!("2024-05-01");
        let forecast: WeatherForecast = parse(json!({
            "location": { "lat": 35.68, "lon": 139.69 },
            "daily": [day],
            "hourly": [condition_json()],
            "lastUpdated": "2024-05-01T09:00:00Z"
        }))
        .unwrap();
        assert_eq!(forecast.daily[0].date, "2024-05-01");
        assert_eq!(forecast.daily[0].condition.condition, "sunny");
    }

    #[test]
    fn test_daily_without_date_is_rejected() {
        let errors = parse::<WeatherForecastDaily>(condition_json()).unwrap_err();
        assert!(errors.has_field("date"));
    }

    #[test]
    fn test_alert_rejects_unknown_severity() {
        let errors = parse::<WeatherAlert>(json!({
            "type": "warning",
            "title": "大雨",
            "description": "大雨警報",
            "severity": "extreme"
        }))
        .unwrap_err();
        assert!(errors.has_field("severity"));
    }
}
