//! Configuration options for the forecast-app client

use std::env;
use std::time::Duration;

/// Backend origin used when no environment override is present
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Configuration options for the forecast-app client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Backend origin; endpoint paths are appended to it
    pub base_url: String,

    /// Per-request timeout. Backend calls have none unless set.
    pub request_timeout: Option<Duration>,

    /// How long to wait for a device position
    pub geolocation_timeout: Duration,

    /// How old a cached device position may be
    pub geolocation_max_age: Duration,

    /// Lifetime of the stored auth token
    pub token_lifetime: chrono::Duration,

    /// Production mode marks the stored token as secure
    pub production: bool,

    /// Value of the User-Agent header
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            geolocation_timeout: Duration::from_secs(10),
            geolocation_max_age: Duration::from_secs(300),
            token_lifetime: chrono::Duration::days(7),
            production: false,
            user_agent: format!("forecast-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Read options from the environment.
    ///
    /// `NEXT_PUBLIC_BACKEND_URL` wins over `NEXT_PUBLIC_API_URL`; production mode
    /// is enabled when `APP_ENV` or `NODE_ENV` equals `production`.
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Some(url) = ["NEXT_PUBLIC_BACKEND_URL", "NEXT_PUBLIC_API_URL"]
            .iter()
            .filter_map(|key| env::var(key).ok())
            .find(|value| !value.trim().is_empty())
        {
            options.base_url = url;
        }

        options.production = ["APP_ENV", "NODE_ENV"]
            .iter()
            .filter_map(|key| env::var(key).ok())
            .any(|value| value == "production");

        options
    }

    /// Set the backend origin
    pub fn with_base_url(mut self, value: &str) -> Self {
        self.base_url = value.to_string();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the geolocation timeout
    pub fn with_geolocation_timeout(mut self, value: Duration) -> Self {
        self.geolocation_timeout = value;
        self
    }

    /// Set the lifetime of stored auth tokens
    pub fn with_token_lifetime(mut self, value: chrono::Duration) -> Self {
        self.token_lifetime = value;
        self
    }

    /// Set production mode
    pub fn with_production(mut self, value: bool) -> Self {
        self.production = value;
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, value: &str) -> Self {
        self.user_agent = value.to_string();
        self
    }

    /// Base URL without a trailing slash
    pub(crate) fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ClientOptions::default();
        assert_eq!(options.base_url, "http://localhost:8080");
        assert!(options.request_timeout.is_none());
        assert_eq!(options.geolocation_timeout, Duration::from_secs(10));
        assert_eq!(options.token_lifetime, chrono::Duration::days(7));
        assert!(!options.production);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let options = ClientOptions::default().with_base_url("https://api.example.com/api/");
        assert_eq!(options.normalized_base_url(), "https://api.example.com/api");
    }
}
