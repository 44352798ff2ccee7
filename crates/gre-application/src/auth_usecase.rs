//! Login, logout and session restore.

use std::sync::Arc;

use gre_core::Result;
use gre_core::api::LoginApi;
use gre_core::auth::{ClientContext, GuardDecision, LoginGateway, LoginRequest, SessionStore, UserData};
use gre_core::config::DashboardConfig;
use gre_core::route::Route;

/// Ties the login gateway to the persisted session.
pub struct AuthUseCase {
    gateway: LoginGateway,
    session: Arc<SessionStore>,
}

impl AuthUseCase {
    pub fn new(
        login_api: Arc<dyn LoginApi>,
        session: Arc<SessionStore>,
        config: &DashboardConfig,
    ) -> Self {
        Self {
            gateway: LoginGateway::new(login_api, config),
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Authenticates and persists the session.
    ///
    /// With `remember_me` the email is kept for the next login form;
    /// without it any previously remembered email is forgotten.
    pub async fn login(&self, request: &LoginRequest, client: &ClientContext) -> Result<UserData> {
        let login = self.gateway.authenticate(request, client).await?;

        self.session
            .login(login.user.clone(), &login.access_token, request.remember_me)?;
        let remembered = request.remember_me.then_some(request.email.trim());
        self.session.remember_email(remembered)?;

        Ok(login.user)
    }

    /// Loads the persisted session and returns what a protected view should do.
    pub fn restore(&self) -> GuardDecision {
        self.session.check_auth();
        self.session.guard()
    }

    pub fn logout(&self) -> Route {
        self.session.logout()
    }

    /// Email to pre-fill on the login form.
    pub fn remembered_email(&self) -> Option<String> {
        self.session.remembered_email()
    }
}
