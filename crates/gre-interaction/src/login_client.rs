//! `reqwest` implementation of [`LoginApi`].

use std::time::Duration;

use async_trait::async_trait;
use gre_core::Result;
use gre_core::api::LoginApi;
use gre_core::auth::model::{LoginApiResponse, LoginPayload, LoginResponse};
use gre_core::config::DashboardConfig;
use reqwest::Client;

use crate::http::{json_or_null, send};

/// Posts login payloads to the upstream login endpoint.
#[derive(Clone)]
pub struct RemoteLoginClient {
    client: Client,
    login_url: String,
    timeout: Duration,
}

impl RemoteLoginClient {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            client: Client::new(),
            login_url: config.login_url.clone(),
            timeout: config.request_timeout(),
        }
    }
}

#[async_trait]
impl LoginApi for RemoteLoginClient {
    async fn login(&self, payload: &LoginPayload) -> Result<LoginApiResponse> {
        tracing::debug!(url = %self.login_url, email = %payload.email, "Posting login");
        let request = self.client.post(&self.login_url).json(payload);
        let response = send(request, self.timeout).await?;

        let status = response.status().as_u16();
        let body = json_or_null(response, self.timeout).await?;
        let body: LoginResponse = serde_json::from_value(body).unwrap_or_else(|e| {
            tracing::warn!(status, error = %e, "Login response body not understood");
            LoginResponse::default()
        });

        Ok(LoginApiResponse { status, body })
    }
}
