//! Login gateway: credential aliasing and allow-list enforcement in front of
//! the upstream login endpoint.

use std::sync::Arc;

use chrono::Utc;

use crate::api::LoginApi;
use crate::auth::model::{DeviceInfo, LoginPayload, LoginRequest, LoginSession};
use crate::config::{AuthSettings, DashboardConfig};
use crate::error::{GreError, Result};

pub const CREDENTIALS_REQUIRED_MESSAGE: &str = "Email and password are required";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied. You are not authorized to use this system.";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

const UNKNOWN: &str = "Unknown";
const LOOPBACK_IP: &str = "127.0.0.1";

/// Caller details that end up in the login payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientContext {
    pub ip_address: String,
    pub user_agent: String,
}

impl Default for ClientContext {
    fn default() -> Self {
        Self {
            ip_address: LOOPBACK_IP.to_string(),
            user_agent: UNKNOWN.to_string(),
        }
    }
}

impl ClientContext {
    /// Resolves the caller from proxy headers.
    ///
    /// The first `x-forwarded-for` entry wins, then `x-real-ip`, then loopback.
    pub fn from_headers(
        forwarded_for: Option<&str>,
        real_ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> Self {
        let forwarded = forwarded_for
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());
        let real_ip = real_ip.map(str::trim).filter(|ip| !ip.is_empty());

        Self {
            ip_address: forwarded
                .or(real_ip)
                .unwrap_or(LOOPBACK_IP)
                .to_string(),
            user_agent: user_agent
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or(UNKNOWN)
                .to_string(),
        }
    }
}

pub struct LoginGateway {
    api: Arc<dyn LoginApi>,
    settings: AuthSettings,
    business_identifier: String,
    app_version: String,
    platform: String,
}

impl LoginGateway {
    pub fn new(api: Arc<dyn LoginApi>, config: &DashboardConfig) -> Self {
        Self {
            api,
            settings: config.auth.clone(),
            business_identifier: config.business_identifier.clone(),
            app_version: config.app_version.clone(),
            platform: config.platform.clone(),
        }
    }

    /// Maps an aliased front-end password to its upstream credential.
    ///
    /// Emails without an alias pass their password through unchanged.
    pub fn resolve_password(&self, email: &str, password: &str) -> Result<String> {
        let alias = self
            .settings
            .credential_aliases
            .iter()
            .find(|alias| alias.email.eq_ignore_ascii_case(email.trim()));

        match alias {
            Some(alias) if alias.frontend_password == password => {
                tracing::debug!(email, "Mapped aliased credential");
                Ok(alias.backend_password.clone())
            }
            Some(_) => Err(GreError::auth(INVALID_CREDENTIALS_MESSAGE)),
            None => Ok(password.to_string()),
        }
    }

    pub fn build_payload(
        &self,
        request: &LoginRequest,
        password: String,
        client: &ClientContext,
        now_ms: i64,
    ) -> LoginPayload {
        let device_info = DeviceInfo {
            user_agent: client.user_agent.clone(),
            platform: self.platform.clone(),
            app_version: self.app_version.clone(),
            system_version: UNKNOWN.to_string(),
            network_type: UNKNOWN.to_string(),
            screen_resolution: UNKNOWN.to_string(),
            device_model: UNKNOWN.to_string(),
        };

        LoginPayload {
            email: request.email.clone(),
            password,
            business_identifier: self.business_identifier.clone(),
            remember_me: request.remember_me,
            device_info,
            device_id: format!("web_{}", now_ms),
            session_id: format!("session_{}", now_ms),
            ip_address: client.ip_address.clone(),
            platform: self.platform.clone(),
            app_version: self.app_version.clone(),
            system_version: UNKNOWN.to_string(),
            network_type: UNKNOWN.to_string(),
            screen_resolution: UNKNOWN.to_string(),
            device_model: UNKNOWN.to_string(),
            silent_relogin: false,
        }
    }

    fn is_allowed(&self, full_name: &str) -> bool {
        self.settings
            .allowed_full_names
            .iter()
            .any(|allowed| allowed == full_name)
    }

    /// Validates, forwards and authorizes a login attempt.
    pub async fn authenticate(
        &self,
        request: &LoginRequest,
        client: &ClientContext,
    ) -> Result<LoginSession> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(GreError::validation(CREDENTIALS_REQUIRED_MESSAGE));
        }

        let password = self.resolve_password(&request.email, &request.password)?;
        let payload = self.build_payload(
            request,
            password,
            client,
            Utc::now().timestamp_millis(),
        );

        tracing::debug!(email = %request.email, ip = %client.ip_address, "Forwarding login");
        let response = self.api.login(&payload).await?;

        if !response.is_ok() {
            let message = response
                .body
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string());
            tracing::info!(status = response.status, "Upstream rejected login");
            return Err(GreError::Upstream {
                status: response.status,
                message,
            });
        }

        let data = match response.body.data {
            Some(data) if response.body.success => data,
            _ => return Err(GreError::auth(INVALID_CREDENTIALS_MESSAGE)),
        };

        if !self.is_allowed(&data.sales_person.full_name) {
            tracing::warn!(
                full_name = %data.sales_person.full_name,
                "Login refused: user is not on the allow-list"
            );
            return Err(GreError::AccessDenied(ACCESS_DENIED_MESSAGE.to_string()));
        }

        Ok(LoginSession {
            user: data.sales_person,
            access_token: data.token.access_token,
        })
    }
}
