//! Test doubles and fixture data
//!
//! Nothing in the production models falls back to these types. They exist for
//! tests, demos and offline development.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};

use forecast_rust_schema::{
    check, AuthResponse, Coordinates, Location, LoginRequest, ProfileUpdate, RegisterRequest,
    User, UserPreferences, WeatherAlert, WeatherCondition, WeatherForecast, WeatherForecastDaily,
};

use crate::auth::{AuthStorage, UserApi};
use crate::catalog::weather_description;
use crate::error::{Error, Result};
use crate::location::{Geocoder, Position, PositionOptions, PositionProvider};
use crate::storage::{lock, MemoryStore, SessionStore};
use crate::weather::WeatherApi;

pub const MOCK_EMAIL: &str = "test@example.com";
pub const MOCK_PASSWORD: &str = "password";

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn mock_token(user_id: &str) -> String {
    format!("mock_token_{}_{}", user_id, Utc::now().timestamp_millis())
}

/// The account every [`MockUserModel`] starts with
pub fn mock_user() -> User {
    let now = now_iso();
    User {
        id: "1".into(),
        name: "テストユーザー".into(),
        email: MOCK_EMAIL.into(),
        gender: None,
        age: None,
        location: None,
        bio: None,
        preferences: Some(UserPreferences {
            styles: vec!["casual".into()],
            colors: vec!["blue".into(), "black".into()],
            preferred_colors: vec!["blue".into(), "black".into()],
            preferred_brands: vec!["Uniqlo".into()],
            ..UserPreferences::default()
        }),
        created_at: now.clone(),
        updated_at: now,
    }
}

/// In-memory user backend.
///
/// Accepts `test@example.com` / `password`, keeps registered users for its own
/// lifetime and persists sessions like [`crate::auth::UserModel`] does.
pub struct MockUserModel {
    users: Mutex<Vec<User>>,
    auth: AuthStorage,
    latency: Duration,
}

impl Default for MockUserModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUserModel {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Persist sessions into `store` instead of a private memory store
    pub fn with_store(store: Arc<dyn SessionStore>) -> Self {
        Self {
            users: Mutex::new(vec![mock_user()]),
            auth: AuthStorage::new(store, chrono::Duration::days(7), false),
            latency: Duration::ZERO,
        }
    }

    /// Delay every call, to exercise loading indicators
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn pause(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn first_user(&self) -> Result<User> {
        lock(&self.users)
            .first()
            .cloned()
            .ok_or_else(|| Error::application("ユーザーが見つかりません"))
    }

    fn replace_first(&self, user: User) -> User {
        let mut users = lock(&self.users);
        if let Some(first) = users.first_mut() {
            *first = user.clone();
        }
        user
    }

    fn authenticate(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        let user = lock(&self.users)
            .iter()
            .find(|u| u.email == credentials.email)
            .cloned();

        match user {
            Some(user) if credentials.password == MOCK_PASSWORD => {
                let token = mock_token(&user.id);
                self.auth.save_session(&token, &user)?;
                Ok(AuthResponse { user, token })
            }
            _ => Err(Error::application(
                "メールアドレスまたはパスワードが正しくありません",
            )),
        }
    }

    fn create_account(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let user = {
            let mut users = lock(&self.users);
            if users.iter().any(|u| u.email == request.email) {
                return Err(Error::application(
                    "このメールアドレスは既に登録されています",
                ));
            }
            let now = now_iso();
            let user = User {
                id: (users.len() + 1).to_string(),
                name: request.name.clone(),
                email: request.email.clone(),
                gender: request.gender.clone(),
                age: request.age,
                location: None,
                bio: None,
                preferences: Some(UserPreferences::default()),
                created_at: now.clone(),
                updated_at: now,
            };
            users.push(user.clone());
            user
        };

        let token = mock_token(&user.id);
        self.auth.save_session(&token, &user)?;
        Ok(AuthResponse { user, token })
    }
}

#[async_trait]
impl UserApi for MockUserModel {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        self.pause().await;
        self.authenticate(credentials)
    }

    async fn register(&self, user: &RegisterRequest) -> Result<AuthResponse> {
        self.pause().await;
        self.create_account(user)
    }

    async fn get_profile(&self) -> Result<User> {
        self.pause().await;
        self.first_user()
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<User> {
        self.pause().await;
        lock(&self.users)
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| Error::application("ユーザーが見つかりません"))
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        self.pause().await;
        let mut user = update.apply_to(&self.first_user()?);
        user.updated_at = now_iso();
        Ok(self.replace_first(user))
    }

    async fn update_preferences(&self, preferences: &UserPreferences) -> Result<User> {
        self.pause().await;
        let mut user = self.first_user()?;
        user.preferences = Some(preferences.clone());
        user.updated_at = now_iso();
        Ok(self.replace_first(user))
    }

    async fn login_validated(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        check(credentials)?;
        self.login(credentials).await
    }

    async fn register_validated(&self, user: &RegisterRequest) -> Result<AuthResponse> {
        check(user)?;
        self.register(user).await
    }

    async fn current_user_validated(&self) -> Result<User> {
        self.pause().await;
        if !self.auth.is_authenticated() {
            return Err(Error::application("Not authenticated"));
        }
        self.auth
            .user()?
            .ok_or_else(|| Error::application("ユーザーが見つかりません"))
    }

    fn logout(&self) -> Result<()> {
        self.auth.logout()
    }

    fn current_user(&self) -> Result<Option<User>> {
        self.auth.user()
    }

    fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated() && matches!(self.auth.user(), Ok(Some(_)))
    }
}

const CONDITIONS: [&str; 4] = ["sunny", "cloudy", "rainy", "snowy"];

/// Deterministic weather derived from the coordinates.
///
/// The same coordinates always produce the same conditions; alerts are empty.
#[derive(Debug, Clone, Default)]
pub struct FixtureWeatherModel;

impl FixtureWeatherModel {
    pub fn new() -> Self {
        Self
    }

    fn seed(lat: f64, lon: f64, day: usize) -> usize {
        ((lat.abs() * 100.0 + lon.abs() * 10.0) as usize).wrapping_add(day * 7)
    }

    fn condition_at(lat: f64, lon: f64, day: usize, date_time: String) -> WeatherCondition {
        let seed = Self::seed(lat, lon, day);
        let condition = CONDITIONS[seed % CONDITIONS.len()];
        let temperature = (15 + seed % 15) as f64;

        WeatherCondition {
            temperature,
            feels_like: temperature - 1.0,
            description: weather_description(condition).to_string(),
            wind_direction: (seed * 37 % 360) as f64,
            visibility: (8 + seed % 3) as f64,
            uv_index: (seed % 12) as f64,
            condition: condition.to_string(),
            humidity: (40 + seed % 41) as f64,
            wind_speed: (seed % 16) as f64,
            cloud_cover: (seed * 13 % 101) as f64,
            location: format!("{}, {}", lat, lon),
            date_time,
            pressure: (1000 + seed % 51) as f64,
        }
    }
}

#[async_trait]
impl WeatherApi for FixtureWeatherModel {
    async fn current(&self, lat: f64, lon: f64) -> Result<WeatherCondition> {
        Ok(Self::condition_at(lat, lon, 0, now_iso()))
    }

    async fn forecast(&self, lat: f64, lon: f64) -> Result<WeatherForecast> {
        let today = Utc::now();
        let daily = (0..5)
            .map(|day| {
                let at = today + chrono::Duration::days(day as i64);
                WeatherForecastDaily {
                    date: at.format("%Y-%m-%d").to_string(),
                    condition: Self::condition_at(
                        lat,
                        lon,
                        day,
                        at.to_rfc3339_opts(SecondsFormat::Millis, true),
                    ),
                }
            })
            .collect();

        Ok(WeatherForecast {
            location: Coordinates { lat, lon },
            daily,
            hourly: Vec::new(),
            last_updated: now_iso(),
        })
    }

    async fn alerts(&self, _lat: f64, _lon: f64) -> Result<Vec<WeatherAlert>> {
        Ok(Vec::new())
    }
}

/// Place search over three fixed prefectures
#[derive(Debug, Clone)]
pub struct StaticGeocoder {
    locality: String,
}

impl Default for StaticGeocoder {
    fn default() -> Self {
        Self {
            locality: "東京都".into(),
        }
    }
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name returned by every reverse lookup
    pub fn with_locality(locality: impl Into<String>) -> Self {
        Self {
            locality: locality.into(),
        }
    }
}

const PREFECTURES: [(&str, f64, f64); 3] = [
    ("東京都", 35.6762, 139.6503),
    ("大阪府", 34.6937, 135.5023),
    ("愛知県", 35.1815, 136.9066),
];

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<Location>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(PREFECTURES
            .iter()
            .map(|(state, lat, lon)| Location::new(*lat, *lon, format!("{} - {}", query, state)))
            .collect())
    }

    async fn reverse(&self, _lat: f64, _lon: f64) -> Result<String> {
        Ok(self.locality.clone())
    }
}

/// Position provider returning a fixed fix, optionally after a delay
#[derive(Debug, Clone)]
pub struct FixedPosition {
    position: Option<Position>,
    delay: Duration,
}

impl FixedPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            position: Some(Position {
                latitude,
                longitude,
                accuracy: Some(10.0),
            }),
            delay: Duration::ZERO,
        }
    }

    /// A device without positioning support
    pub fn unavailable() -> Self {
        Self {
            position: None,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl PositionProvider for FixedPosition {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Position> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.position
            .ok_or_else(|| Error::application("Geolocation is not supported on this device"))
    }
}
