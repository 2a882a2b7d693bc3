//! Authentication and user profiles

mod session;

use async_trait::async_trait;

use forecast_rust_schema::{
    check, AuthResponse, LoginRequest, ProfileUpdate, RegisterRequest, User, UserPreferences,
};

use crate::error::{logged, Result};
use crate::fetch::ApiClient;

pub use session::*;

/// User and session operations, implemented by [`UserModel`] and by test doubles
#[async_trait]
pub trait UserApi: Send + Sync {
    /// `POST /login`; stores token and user on success
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse>;

    /// `POST /register`; stores token and user on success
    async fn register(&self, user: &RegisterRequest) -> Result<AuthResponse>;

    async fn get_profile(&self) -> Result<User>;

    async fn get_user_by_id(&self, user_id: &str) -> Result<User>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User>;

    async fn update_preferences(&self, preferences: &UserPreferences) -> Result<User>;

    /// `POST /auth/login` with request and response schema checks
    async fn login_validated(&self, credentials: &LoginRequest) -> Result<AuthResponse>;

    /// `POST /auth/register` with request and response schema checks
    async fn register_validated(&self, user: &RegisterRequest) -> Result<AuthResponse>;

    /// `GET /auth/me` with response schema check
    async fn current_user_validated(&self) -> Result<User>;

    /// Forget the stored session
    fn logout(&self) -> Result<()>;

    /// Cached user snapshot from the last login
    fn current_user(&self) -> Result<Option<User>>;

    fn is_authenticated(&self) -> bool;
}

/// Client for the user endpoints
#[derive(Clone)]
pub struct UserModel {
    client: ApiClient,
}

impl UserModel {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn remember(&self, response: &AuthResponse) -> Result<()> {
        self.client
            .auth_storage()
            .save_session(&response.token, &response.user)
    }
}

#[async_trait]
impl UserApi for UserModel {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        let response: AuthResponse = self
            .client
            .post("/login")
            .auth(false)
            .json(credentials)?
            .execute()
            .await
            .map_err(logged("Login failed"))?;

        self.remember(&response)?;
        Ok(response)
    }

    async fn register(&self, user: &RegisterRequest) -> Result<AuthResponse> {
        let response: AuthResponse = self
            .client
            .post("/register")
            .auth(false)
            .json(user)?
            .execute()
            .await
            .map_err(logged("Registration failed"))?;

        self.remember(&response)?;
        Ok(response)
    }

    async fn get_profile(&self) -> Result<User> {
        self.client
            .get("/profile")
            .execute()
            .await
            .map_err(logged("Failed to get profile"))
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<User> {
        self.client
            .get(&format!("/users/{}", user_id))
            .execute()
            .await
            .map_err(logged("Failed to get user by ID"))
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        self.client
            .put("/profile")
            .json(update)?
            .execute()
            .await
            .map_err(logged("Failed to update profile"))
    }

    async fn update_preferences(&self, preferences: &UserPreferences) -> Result<User> {
        self.client
            .put("/profile/preferences")
            .json(preferences)?
            .execute()
            .await
            .map_err(logged("Failed to update preferences"))
    }

    async fn login_validated(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        let body = check(credentials)?;
        let response: AuthResponse = self
            .client
            .post("/auth/login")
            .auth(false)
            .json(&body)?
            .execute_validated()
            .await
            .map_err(logged("Login failed"))?;

        self.remember(&response)?;
        Ok(response)
    }

    async fn register_validated(&self, user: &RegisterRequest) -> Result<AuthResponse> {
        let body = check(user)?;
        let response: AuthResponse = self
            .client
            .post("/auth/register")
            .auth(false)
            .json(&body)?
            .execute_validated()
            .await
            .map_err(logged("Registration failed"))?;

        self.remember(&response)?;
        Ok(response)
    }

    async fn current_user_validated(&self) -> Result<User> {
        self.client
            .get("/auth/me")
            .execute_validated()
            .await
            .map_err(logged("Failed to get current user"))
    }

    fn logout(&self) -> Result<()> {
        self.client.auth_storage().logout()
    }

    fn current_user(&self) -> Result<Option<User>> {
        self.client.auth_storage().user()
    }

    fn is_authenticated(&self) -> bool {
        self.client.auth_storage().is_authenticated()
    }
}
