//! Forecast Rust Client Library
//!
//! A typed client for the forecast-app backend: authentication, closet
//! management, outfit posts, weather and fashion recommendations, plus the
//! controllers that hold screen state on top of them.

pub mod auth;
pub mod catalog;
pub mod clothing;
pub mod config;
pub mod controllers;
pub mod error;
pub mod fashion;
pub mod fetch;
pub mod filters;
pub mod format;
pub mod location;
pub mod mock;
pub mod outfit;
pub mod storage;
pub mod weather;

pub use forecast_rust_schema as schema;

use std::sync::Arc;

use crate::auth::UserModel;
use crate::clothing::ClothingModel;
use crate::config::ClientOptions;
use crate::error::Result;
use crate::fashion::FashionModel;
use crate::fetch::ApiClient;
use crate::location::{FavoritesStore, PositionOptions};
use crate::outfit::OutfitModel;
use crate::storage::{FileStore, MemoryStore, SessionStore};
use crate::weather::WeatherModel;

/// The main entry point for the forecast-app client
///
/// Holds one [`ApiClient`] and hands out models bound to it. Models are cheap
/// to create and share the same HTTP connection pool and session store.
#[derive(Clone)]
pub struct Forecast {
    client: ApiClient,
    store: Arc<dyn SessionStore>,
    options: ClientOptions,
}

impl Forecast {
    /// Create a client with a session that lives in memory only
    ///
    /// # Example
    ///
    /// ```
    /// use forecast_rust::Forecast;
    ///
    /// let forecast = Forecast::new("http://localhost:8080").unwrap();
    /// assert_eq!(forecast.client().base_url(), "http://localhost:8080");
    /// ```
    pub fn new(base_url: &str) -> Result<Self> {
        Self::new_with_options(
            ClientOptions::default().with_base_url(base_url),
            Arc::new(MemoryStore::new()),
        )
    }

    /// Create a client from the environment, persisting the session to `session_file`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use forecast_rust::Forecast;
    ///
    /// let forecast = Forecast::from_env("/tmp/forecast-session.json").unwrap();
    /// ```
    pub fn from_env(session_file: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::new_with_options(
            ClientOptions::from_env(),
            Arc::new(FileStore::new(session_file)),
        )
    }

    /// Create a client with custom options and session store
    pub fn new_with_options(options: ClientOptions, store: Arc<dyn SessionStore>) -> Result<Self> {
        let client = ApiClient::new(&options, store.clone())?;
        Ok(Self {
            client,
            store,
            options,
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn store(&self) -> Arc<dyn SessionStore> {
        self.store.clone()
    }

    pub fn users(&self) -> UserModel {
        UserModel::new(self.client.clone())
    }

    pub fn clothing(&self) -> ClothingModel {
        ClothingModel::new(self.client.clone())
    }

    pub fn outfits(&self) -> OutfitModel {
        OutfitModel::new(self.client.clone())
    }

    pub fn weather(&self) -> WeatherModel {
        WeatherModel::new(self.client.clone())
    }

    pub fn fashion(&self) -> FashionModel {
        FashionModel::new(self.client.clone())
    }

    /// Favorite locations kept in the same store as the session
    pub fn favorites(&self) -> FavoritesStore {
        FavoritesStore::new(self.store.clone())
    }

    /// Positioning options derived from the client options
    pub fn position_options(&self) -> PositionOptions {
        PositionOptions::from(&self.options)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::UserApi;
    pub use crate::clothing::ClothingApi;
    pub use crate::config::ClientOptions;
    pub use crate::controllers::*;
    pub use crate::error::{Error, Result};
    pub use crate::fashion::FashionApi;
    pub use crate::outfit::OutfitApi;
    pub use crate::weather::WeatherApi;
    pub use crate::Forecast;
    pub use forecast_rust_schema::*;
}
