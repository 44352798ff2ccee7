//! Session store: authenticated identity and bearer token held in local storage.

use std::sync::{Arc, PoisonError, RwLock};

use crate::auth::model::UserData;
use crate::auth::storage::{
    ACCESS_TOKEN_KEY, AUTH_KEYS, LocalStorage, REMEMBER_ME_KEY, REMEMBERED_EMAIL_KEY,
    USER_DATA_KEY,
};
use crate::error::Result;
use crate::route::Route;

/// Observable authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<UserData>,
    pub is_authenticated: bool,
    /// True until the persisted session has been checked once.
    pub is_loading: bool,
    pub is_loaded: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: true,
            is_loaded: false,
        }
    }
}

/// What a view requiring authentication should do right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Initial restore still pending; show a loading state.
    Loading,
    Redirect(Route),
    Allow(UserData),
}

/// Holds the logged-in identity and persists it through a [`LocalStorage`].
///
/// Storage failures while *reading* never surface to the caller: a session
/// that cannot be read is treated as logged out.
pub struct SessionStore {
    storage: Arc<dyn LocalStorage>,
    state: RwLock<AuthState>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            storage,
            state: RwLock::new(AuthState::default()),
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_state(&self, state: AuthState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Persists a fresh login and marks the store authenticated.
    pub fn login(&self, user: UserData, access_token: &str, remember_me: bool) -> Result<()> {
        let user_json = serde_json::to_string(&user)?;
        self.storage.set(ACCESS_TOKEN_KEY, access_token)?;
        self.storage.set(USER_DATA_KEY, &user_json)?;

        if remember_me {
            self.storage.set(REMEMBER_ME_KEY, "true")?;
        } else {
            self.storage.clear(REMEMBER_ME_KEY)?;
        }

        tracing::info!(user_id = %user.user_id, remember_me, "Logged in");

        self.set_state(AuthState {
            user: Some(user),
            is_authenticated: true,
            is_loading: false,
            is_loaded: true,
        });
        Ok(())
    }

    /// Clears every persisted auth key and returns the route to navigate to.
    pub fn logout(&self) -> Route {
        for key in AUTH_KEYS {
            if let Err(e) = self.storage.clear(key) {
                tracing::warn!(key, error = %e, "Failed to clear persisted auth key");
            }
        }

        self.set_state(AuthState {
            user: None,
            is_authenticated: false,
            is_loading: false,
            is_loaded: false,
        });

        tracing::info!("Logged out");
        Route::Login
    }

    /// Restores a persisted session.
    ///
    /// Returns `true` when both token and a well-formed identity were found.
    /// A malformed identity is purged together with its token.
    pub fn check_auth(&self) -> bool {
        let token = self.read_key(ACCESS_TOKEN_KEY);
        let user_json = self.read_key(USER_DATA_KEY);

        let (Some(_), Some(user_json)) = (token, user_json) else {
            self.set_state(AuthState {
                is_loading: false,
                ..AuthState::default()
            });
            return false;
        };

        match serde_json::from_str::<UserData>(&user_json) {
            Ok(user) => {
                tracing::debug!(user_id = %user.user_id, "Restored persisted session");
                self.set_state(AuthState {
                    user: Some(user),
                    is_authenticated: true,
                    is_loading: false,
                    is_loaded: true,
                });
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Persisted user data is malformed, purging");
                for key in [ACCESS_TOKEN_KEY, USER_DATA_KEY] {
                    if let Err(e) = self.storage.clear(key) {
                        tracing::warn!(key, error = %e, "Failed to purge persisted auth key");
                    }
                }
                self.set_state(AuthState {
                    is_loading: false,
                    ..AuthState::default()
                });
                false
            }
        }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read persisted auth key");
                None
            }
        }
    }

    /// Bearer token for authenticated requests.
    pub fn token(&self) -> Option<String> {
        self.read_key(ACCESS_TOKEN_KEY)
    }

    pub fn user(&self) -> Option<UserData> {
        self.state().user
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated
    }

    pub fn is_sales_manager(&self) -> bool {
        self.state()
            .user
            .as_ref()
            .is_some_and(UserData::is_sales_manager)
    }

    /// Decision for a view that requires authentication.
    pub fn guard(&self) -> GuardDecision {
        let state = self.state();
        if state.is_loading {
            return GuardDecision::Loading;
        }
        match state.user {
            Some(user) if state.is_authenticated => GuardDecision::Allow(user),
            _ => GuardDecision::Redirect(Route::Login),
        }
    }

    /// Stores (or forgets) the email to pre-fill on the next login form.
    pub fn remember_email(&self, email: Option<&str>) -> Result<()> {
        match email {
            Some(email) => self.storage.set(REMEMBERED_EMAIL_KEY, email),
            None => self.storage.clear(REMEMBERED_EMAIL_KEY),
        }
    }

    /// Email to pre-fill, only when the remember flag is set as well.
    pub fn remembered_email(&self) -> Option<String> {
        let remember = self.read_key(REMEMBER_ME_KEY);
        if remember.as_deref() != Some("true") {
            return None;
        }
        self.read_key(REMEMBERED_EMAIL_KEY)
    }
}
