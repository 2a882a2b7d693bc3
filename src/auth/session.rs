//! Session persistence for authentication

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use forecast_rust_schema::User;

use crate::error::Result;
use crate::storage::{read_json, write_json, SessionStore};

/// Key of the stored auth token
pub const TOKEN_KEY: &str = "auth_token";

/// Key of the cached user snapshot
pub const USER_KEY: &str = "user_data";

/// Cookie same-site policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// The stored bearer token and its cookie attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenCookie {
    /// The token value
    pub value: String,

    /// The expiry timestamp
    pub expires_at: DateTime<Utc>,

    /// Only sent over HTTPS
    pub secure: bool,

    /// Same-site policy
    pub same_site: SameSite,
}

impl TokenCookie {
    /// Create a cookie that expires `lifetime` from now
    pub fn new(value: &str, lifetime: Duration, secure: bool) -> Self {
        Self {
            value: value.to_string(),
            expires_at: Utc::now() + lifetime,
            secure,
            same_site: SameSite::Strict,
        }
    }

    /// Check if the cookie has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Token and user snapshot persisted between runs
#[derive(Clone)]
pub struct AuthStorage {
    store: Arc<dyn SessionStore>,
    lifetime: Duration,
    secure: bool,
}

impl AuthStorage {
    pub fn new(store: Arc<dyn SessionStore>, lifetime: Duration, secure: bool) -> Self {
        Self {
            store,
            lifetime,
            secure,
        }
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        let cookie = TokenCookie::new(token, self.lifetime, self.secure);
        write_json(self.store.as_ref(), TOKEN_KEY, &cookie)
    }

    /// The stored token cookie, if present and not expired
    pub fn token_cookie(&self) -> Result<Option<TokenCookie>> {
        let cookie: Option<TokenCookie> = read_json(self.store.as_ref(), TOKEN_KEY)?;
        Ok(cookie.filter(|c| !c.is_expired()))
    }

    /// The stored token value, if present and not expired
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self.token_cookie()?.map(|c| c.value))
    }

    pub fn remove_token(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)
    }

    pub fn set_user(&self, user: &User) -> Result<()> {
        write_json(self.store.as_ref(), USER_KEY, user)
    }

    pub fn user(&self) -> Result<Option<User>> {
        read_json(self.store.as_ref(), USER_KEY)
    }

    pub fn remove_user(&self) -> Result<()> {
        self.store.remove(USER_KEY)
    }

    /// A live token is stored
    pub fn is_authenticated(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }

    /// Persist the outcome of a successful login or registration
    pub fn save_session(&self, token: &str, user: &User) -> Result<()> {
        self.set_token(token)?;
        self.set_user(user)
    }

    /// Forget token and user
    pub fn logout(&self) -> Result<()> {
        self.remove_token()?;
        self.remove_user()
    }
}
