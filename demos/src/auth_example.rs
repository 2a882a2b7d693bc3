use std::env;

use dotenv::dotenv;
use forecast_rust::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();
    pretty_env_logger::init();

    let email = env::var("FORECAST_EMAIL").unwrap_or_else(|_| "test@example.com".to_string());
    let password = env::var("FORECAST_PASSWORD").unwrap_or_else(|_| "password".to_string());

    // Session is kept between runs in the working directory
    let forecast = Forecast::from_env(".forecast-session.json")?;
    println!("Backend: {}", forecast.client().base_url());

    let auth = AuthController::new(forecast.users());
    let state = auth.state().await;
    if state.is_authenticated {
        println!("Resuming session for {:?}", state.user.map(|u| u.email));
    } else {
        println!("Logging in as {}", email);
        if auth
            .login_validated(&LoginRequest::new(&email, &password))
            .await
            .is_err()
        {
            println!("Login failed: {:?}", auth.state().await.error);
            return Ok(());
        }
    }

    // プロフィールを取得
    auth.get_profile().await?;
    if let Some(user) = auth.state().await.user {
        println!("Signed in as {} <{}>", user.name, user.email);
        if let Some(preferences) = user.preferences {
            println!("Preferred style: {}", preferences.style);
        }
    }

    if env::var("FORECAST_LOGOUT").is_ok() {
        auth.logout().await;
        println!("Signed out");
    }

    Ok(())
}
