//! `reqwest` implementation of [`DashboardApi`].

use std::time::Duration;

use async_trait::async_trait;
use gre_core::api::{CustomerQuery, DashboardApi};
use gre_core::config::DashboardConfig;
use gre_core::customer::{Customer, CustomerPatch, decode_customers};
use gre_core::decode::object_or_data;
use gre_core::sales_person::{SalesPerson, decode_sales_people};
use gre_core::session::{ActiveSession, normalize_sessions};
use gre_core::{GreError, Result};
use reqwest::Client;

use crate::http::{authorize, check_status, json_or_null, send};

/// Client for the customer, active-session and sales-people endpoints.
#[derive(Clone)]
pub struct DashboardApiClient {
    client: Client,
    base_url: String,
    project_id: String,
    timeout: Duration,
}

impl DashboardApiClient {
    pub fn new(config: &DashboardConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &DashboardConfig) -> Self {
        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            timeout: config.request_timeout(),
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn active_sessions_url(&self) -> String {
        format!("{}/api/sales-person/active-sessions", self.base_url)
    }

    fn customers_url(&self) -> String {
        format!("{}/customer/{}", self.base_url, self.project_id)
    }

    fn sales_people_url(&self) -> String {
        format!("{}/sales-people/project/{}", self.base_url, self.project_id)
    }
}

#[async_trait]
impl DashboardApi for DashboardApiClient {
    async fn fetch_active_sessions(&self, token: Option<&str>) -> Result<Vec<ActiveSession>> {
        let url = self.active_sessions_url();
        let request = authorize(
            self.client
                .get(&url)
                .query(&[("project_id", self.project_id.as_str())]),
            token,
        )?;

        tracing::debug!(url = %url, "Fetching active sessions");
        let response = send(request, self.timeout).await?;
        check_status(&response, "fetch active sessions")?;

        let sessions = normalize_sessions(json_or_null(response, self.timeout).await?);
        tracing::debug!(count = sessions.len(), "Fetched active sessions");
        Ok(sessions)
    }

    async fn fetch_customers(
        &self,
        token: Option<&str>,
        query: &CustomerQuery,
    ) -> Result<Vec<Customer>> {
        let url = self.customers_url();
        let mut request = self.client.get(&url);
        if let Some((key, value)) = query.query_pair() {
            request = request.query(&[(key, value)]);
        }
        let request = authorize(request, token)?;

        tracing::debug!(url = %url, ?query, "Fetching customers");
        let response = send(request, self.timeout).await?;
        check_status(&response, "fetch customers")?;

        let customers = decode_customers(json_or_null(response, self.timeout).await?);
        tracing::debug!(count = customers.len(), "Fetched customers");
        Ok(customers)
    }

    async fn update_customer(
        &self,
        token: Option<&str>,
        id: &str,
        patch: &CustomerPatch,
    ) -> Result<Customer> {
        if patch.is_empty() {
            return Err(GreError::validation("Nothing to update"));
        }

        let url = format!("{}/{}", self.customers_url(), id);
        let request = authorize(self.client.put(&url).json(patch), token)?;

        tracing::debug!(url = %url, fields = patch.fields().len(), "Updating customer");
        let response = send(request, self.timeout).await?;
        check_status(&response, "update customer")?;

        let body = object_or_data(json_or_null(response, self.timeout).await?);
        serde_json::from_value(body).map_err(|e| {
            tracing::warn!(id, error = %e, "Update response is not a customer record");
            GreError::MalformedResponse(format!("customer update for '{}': {}", id, e))
        })
    }

    async fn fetch_sales_people(&self, token: Option<&str>) -> Result<Vec<SalesPerson>> {
        let url = self.sales_people_url();
        let request = authorize(self.client.get(&url), token)?;

        tracing::debug!(url = %url, "Fetching sales people");
        let response = send(request, self.timeout).await?;
        check_status(&response, "fetch sales people")?;

        Ok(decode_sales_people(json_or_null(response, self.timeout).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_follow_project() {
        let config = DashboardConfig {
            api_base_url: "http://api.local/".into(),
            project_id: "demo".into(),
            ..Default::default()
        };
        let client = DashboardApiClient::new(&config);
        assert_eq!(
            client.active_sessions_url(),
            "http://api.local/api/sales-person/active-sessions"
        );
        assert_eq!(client.customers_url(), "http://api.local/customer/demo");
        assert_eq!(client.sales_people_url(), "http://api.local/sales-people/project/demo");
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_request() {
        // Port 9 (discard) is never contacted: the token check comes first.
        let config = DashboardConfig {
            api_base_url: "http://127.0.0.1:9".into(),
            ..Default::default()
        };
        let client = DashboardApiClient::new(&config);

        let err = client.fetch_active_sessions(None).await.unwrap_err();
        assert_eq!(err.to_string(), gre_core::error::MISSING_TOKEN_MESSAGE);

        let err = client.fetch_sales_people(Some("")).await.unwrap_err();
        assert!(err.is_auth());
    }
}
