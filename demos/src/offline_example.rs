//! Runs the controllers against the in-process fixtures; no backend needed.

use std::sync::Arc;

use forecast_rust::format;
use forecast_rust::location::FavoritesStore;
use forecast_rust::mock::{FixedPosition, FixtureWeatherModel, MockUserModel, StaticGeocoder};
use forecast_rust::prelude::*;
use forecast_rust::storage::MemoryStore;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let auth = AuthController::new(MockUserModel::new());
    auth.login(&LoginRequest::new(
        forecast_rust::mock::MOCK_EMAIL,
        forecast_rust::mock::MOCK_PASSWORD,
    ))
    .await?;
    println!("Signed in: {:?}", auth.state().await.user.map(|u| u.name));

    let locations = LocationController::new(
        Arc::new(StaticGeocoder::new()),
        Arc::new(FixedPosition::new(35.6762, 139.6503)),
        Default::default(),
        FavoritesStore::new(Arc::new(MemoryStore::new())),
    );
    locations.search("渋谷").await;
    let found = locations.state().await.locations;
    for location in &found {
        println!("found: {}", location.name);
    }
    if let Some(first) = found.first() {
        locations.add_favorite(first).await;
    }

    let weather = WeatherController::new(FixtureWeatherModel::new());
    for favorite in locations.state().await.favorites {
        weather.weather_for_location(&favorite).await;
        if let Some(forecast) = weather.state().await.forecast {
            for day in forecast.daily {
                println!(
                    "{} {} {}",
                    format::date(&day.condition.date_time),
                    day.condition.description,
                    format::temperature(day.condition.temperature)
                );
            }
        }
    }

    Ok(())
}
