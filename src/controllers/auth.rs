use std::sync::Arc;

use tokio::sync::RwLock;

use forecast_rust_schema::{LoginRequest, ProfileUpdate, RegisterRequest, User, UserPreferences};

use super::RequestTracker;
use crate::auth::UserApi;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// ログイン状態とプロフィールを管理するコントローラー
pub struct AuthController<A: UserApi> {
    api: A,
    state: Arc<RwLock<AuthState>>,
    tracker: RequestTracker,
}

impl<A: UserApi> AuthController<A> {
    /// Create the controller, seeded from the stored session
    pub fn new(api: A) -> Self {
        let state = AuthState {
            user: api.current_user().ok().flatten(),
            is_authenticated: api.is_authenticated(),
            ..AuthState::default()
        };
        Self {
            api,
            state: Arc::new(RwLock::new(state)),
            tracker: RequestTracker::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn state(&self) -> AuthState {
        let mut snapshot = self.state.read().await.clone();
        snapshot.is_loading = self.tracker.is_loading();
        snapshot
    }

    async fn start(&self) {
        self.state.write().await.error = None;
    }

    async fn fail(&self, err: Error, default: &str) -> Error {
        self.state.write().await.error = Some(err.user_message(default));
        err
    }

    async fn signed_in(&self, user: User) {
        let mut state = self.state.write().await;
        state.user = Some(user);
        state.is_authenticated = true;
        state.error = None;
    }

    /// Re-read the stored session
    pub async fn initialize(&self) {
        let user = match self.api.current_user() {
            Ok(user) => user,
            Err(err) => {
                log::warn!("Failed to read stored user: {}", err);
                None
            }
        };
        let mut state = self.state.write().await;
        state.user = user;
        state.is_authenticated = self.api.is_authenticated();
        state.error = None;
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<()> {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.api.login(credentials).await {
            Ok(response) => {
                self.signed_in(response.user).await;
                Ok(())
            }
            Err(err) => Err(self.fail(err, "ログインに失敗しました").await),
        }
    }

    pub async fn register(&self, user: &RegisterRequest) -> Result<()> {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.api.register(user).await {
            Ok(response) => {
                self.signed_in(response.user).await;
                Ok(())
            }
            Err(err) => Err(self.fail(err, "アカウント作成に失敗しました").await),
        }
    }

    /// Clear the session. Storage failures are logged, never surfaced.
    pub async fn logout(&self) {
        if let Err(err) = self.api.logout() {
            log::error!("Logout error: {}", err);
        }
        let mut state = self.state.write().await;
        state.user = None;
        state.is_authenticated = false;
        state.error = None;
    }

    pub async fn get_profile(&self) -> Result<()> {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.api.get_profile().await {
            Ok(user) => {
                self.signed_in(user).await;
                Ok(())
            }
            Err(err) => Err(self.fail(err, "プロフィール取得に失敗しました").await),
        }
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.api.update_profile(update).await {
            Ok(user) => {
                self.state.write().await.user = Some(user);
                Ok(())
            }
            Err(err) => Err(self.fail(err, "プロフィール更新に失敗しました").await),
        }
    }

    pub async fn update_preferences(&self, preferences: &UserPreferences) -> Result<()> {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.api.update_preferences(preferences).await {
            Ok(user) => {
                self.state.write().await.user = Some(user);
                Ok(())
            }
            Err(err) => Err(self.fail(err, "設定更新に失敗しました").await),
        }
    }

    /// Look up another user. Failures land in `error` and yield `None`.
    pub async fn get_user_by_id(&self, user_id: &str) -> Option<User> {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.api.get_user_by_id(user_id).await {
            Ok(user) => Some(user),
            Err(err) => {
                self.fail(err, "ユーザー情報の取得に失敗しました").await;
                None
            }
        }
    }

    pub async fn login_validated(&self, credentials: &LoginRequest) -> Result<()> {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.api.login_validated(credentials).await {
            Ok(response) => {
                self.signed_in(response.user).await;
                Ok(())
            }
            Err(err) => Err(self.fail(err, "ログインに失敗しました").await),
        }
    }

    pub async fn register_validated(&self, user: &RegisterRequest) -> Result<()> {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.api.register_validated(user).await {
            Ok(response) => {
                self.signed_in(response.user).await;
                Ok(())
            }
            Err(err) => Err(self.fail(err, "アカウント作成に失敗しました").await),
        }
    }

    /// Refresh the user from `/auth/me`; on failure the user is signed out silently
    pub async fn current_user_validated(&self) {
        let _loading = self.tracker.begin();
        self.start().await;
        match self.api.current_user_validated().await {
            Ok(user) => self.signed_in(user).await,
            Err(err) => {
                log::debug!("Current user unavailable: {}", err);
                let mut state = self.state.write().await;
                state.user = None;
                state.is_authenticated = false;
                state.error = None;
            }
        }
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }
}
