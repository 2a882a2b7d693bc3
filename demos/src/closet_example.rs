use dotenv::dotenv;
use forecast_rust::filters::{ClothingField, ClothingFilters};
use forecast_rust::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    pretty_env_logger::init();

    let forecast = Forecast::from_env(".forecast-session.json")?;
    if !forecast.users().is_authenticated() {
        println!("No session found, run auth_example first");
        return Ok(());
    }

    let closet = ClothingController::new(forecast.clothing());
    closet.load_categories().await;
    closet.load_items().await;

    let state = closet.state().await;
    if let Some(error) = state.error {
        println!("Could not load the closet: {}", error);
        return Ok(());
    }

    println!("{} items in the closet", state.items.len());
    let stats = closet.stats().await;
    for (category, count) in &stats.by_category {
        println!("  {}: {}", category, count);
    }

    // Winter items only
    let mut filters = ClothingFilters::default();
    filters.set(ClothingField::Season, "winter");
    for item in filters.apply(&state.items) {
        println!("winter: {} ({}, warmth {})", item.name, item.brand, item.warmth_level);
    }

    let mut outfit = forecast_rust::outfit::OutfitBuilder::new();
    for item in state.items {
        outfit.add(item);
    }
    println!("Outfit complete: {}", outfit.is_complete());

    Ok(())
}
