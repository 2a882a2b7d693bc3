//! Favorite locations, device positioning and place search
//!
//! Positioning and geocoding are traits only; the SDK ships fixture
//! implementations in [`crate::mock`] and talks to no geocoding service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use forecast_rust_schema::Location;

use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::storage::{read_json, write_json, SessionStore};

/// Key under which favorites are stored as a JSON array
pub const FAVORITES_KEY: &str = "favoriteLocations";

/// Favorites persisted in a [`SessionStore`].
///
/// Every change reads the stored list, modifies it and writes it back. Two
/// processes sharing a file store overwrite each other; the last writer wins.
#[derive(Clone)]
pub struct FavoritesStore {
    store: Arc<dyn SessionStore>,
}

impl FavoritesStore {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Stored favorites, empty when nothing has been saved yet
    pub fn load(&self) -> Result<Vec<Location>> {
        Ok(read_json(self.store.as_ref(), FAVORITES_KEY)?.unwrap_or_default())
    }

    pub fn save(&self, favorites: &[Location]) -> Result<()> {
        write_json(self.store.as_ref(), FAVORITES_KEY, favorites)
    }

    /// Append `location` and return the new list
    pub fn add(&self, location: &Location) -> Result<Vec<Location>> {
        let mut favorites = self.load()?;
        favorites.push(location.clone());
        self.save(&favorites)?;
        Ok(favorites)
    }

    /// Drop every favorite at the same coordinates and return the new list
    pub fn remove(&self, location: &Location) -> Result<Vec<Location>> {
        let mut favorites = self.load()?;
        favorites.retain(|fav| !fav.same_place(location));
        self.save(&favorites)?;
        Ok(favorites)
    }
}

/// A device position fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Accuracy radius in meters, when the provider reports one
    pub accuracy: Option<f64>,
}

/// Options handed to a [`PositionProvider`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    /// Deadline for a fix; enforced by the caller as well
    pub timeout: Duration,
    /// Oldest cached fix the provider may return
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self::from(&ClientOptions::default())
    }
}

impl From<&ClientOptions> for PositionOptions {
    fn from(options: &ClientOptions) -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: options.geolocation_timeout,
            maximum_age: options.geolocation_max_age,
        }
    }
}

/// Source of the device's current position
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self, options: &PositionOptions) -> Result<Position>;
}

/// Ask `provider` for a fix, failing with [`Error::Timeout`] after `options.timeout`
pub async fn locate(provider: &dyn PositionProvider, options: &PositionOptions) -> Result<Position> {
    tokio::time::timeout(options.timeout, provider.current_position(options))
        .await
        .map_err(|_| Error::timeout(format!("no position fix within {:?}", options.timeout)))?
}

/// Name shown when reverse geocoding finds nothing
pub const UNKNOWN_PLACE: &str = "未知の場所";

/// Free-text place search and reverse lookup
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Location>>;

    /// Human-readable name of the place at the given coordinates
    async fn reverse(&self, lat: f64, lon: f64) -> Result<String>;
}
