use std::env;
use std::sync::Arc;

use dotenv::dotenv;
use forecast_rust::format;
use forecast_rust::mock::{FixedPosition, StaticGeocoder};
use forecast_rust::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    pretty_env_logger::init();

    let lat: f64 = env::var("FORECAST_LAT").ok().and_then(|v| v.parse().ok()).unwrap_or(35.6762);
    let lon: f64 = env::var("FORECAST_LON").ok().and_then(|v| v.parse().ok()).unwrap_or(139.6503);

    let forecast = Forecast::from_env(".forecast-session.json")?;

    let weather = WeatherController::new(forecast.weather());
    weather.weather_for_coords(lat, lon).await;
    let state = weather.state().await;
    match (&state.current, &state.error) {
        (Some(current), _) => {
            println!(
                "{}: {} {} 湿度 {} 風 {}",
                state.last_location.map(|l| l.name).unwrap_or_default(),
                current.description,
                format::temperature(current.temperature),
                format::humidity(current.humidity),
                format::wind_speed(current.wind_speed)
            );
        }
        (None, Some(error)) => println!("Weather unavailable: {}", error),
        (None, None) => {}
    }
    for alert in &state.alerts {
        println!("alert ({:?}): {}", alert.severity, alert.title);
    }

    // Recommendations for a fixed position
    let fashion = FashionController::new(
        forecast.fashion(),
        Arc::new(FixedPosition::new(lat, lon)),
        Arc::new(StaticGeocoder::new()),
        forecast.position_options(),
    );
    if fashion.recommendations_for_current_location().await.is_ok() {
        if let Some(recommendation) = fashion.current_recommendation().await {
            println!("Style: {} ({})", recommendation.style, recommendation.reason);
            for item in recommendation.items {
                println!("  {} / {} - {}", item.category, item.name, item.reason);
            }
        }
    } else {
        println!("No recommendation: {:?}", fashion.state().await.error);
    }

    Ok(())
}
