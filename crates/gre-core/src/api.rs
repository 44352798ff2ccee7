//! Remote API seams.
//!
//! The core crate only describes what the dashboard needs from the network;
//! `gre-interaction` provides the HTTP implementations.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::auth::model::{LoginApiResponse, LoginPayload};
use crate::customer::{Customer, CustomerPatch};
use crate::error::Result;
use crate::sales_person::SalesPerson;
use crate::session::ActiveSession;

/// Which slice of the customer list to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CustomerQuery {
    #[default]
    All,
    /// Customers created on one calendar date (`?date=YYYY-MM-DD`).
    ByDate(NaiveDate),
    BySalesPerson(String),
    ByPhone(String),
}

impl CustomerQuery {
    /// Query-string pair for this slice, if any.
    pub fn query_pair(&self) -> Option<(&'static str, String)> {
        match self {
            CustomerQuery::All => None,
            CustomerQuery::ByDate(date) => Some(("date", date.format("%Y-%m-%d").to_string())),
            CustomerQuery::BySalesPerson(name) => Some(("salesPerson", name.clone())),
            CustomerQuery::ByPhone(phone) => Some(("phone", phone.clone())),
        }
    }
}

/// Authenticated data endpoints.
///
/// Every method takes the bearer token as stored; `None` must fail with
/// [`crate::GreError::missing_token`] before any request is issued.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn fetch_active_sessions(&self, token: Option<&str>) -> Result<Vec<ActiveSession>>;

    async fn fetch_customers(
        &self,
        token: Option<&str>,
        query: &CustomerQuery,
    ) -> Result<Vec<Customer>>;

    async fn update_customer(
        &self,
        token: Option<&str>,
        id: &str,
        patch: &CustomerPatch,
    ) -> Result<Customer>;

    async fn fetch_sales_people(&self, token: Option<&str>) -> Result<Vec<SalesPerson>>;
}

/// Upstream login endpoint.
///
/// Non-2xx answers are returned as a [`LoginApiResponse`], not as errors, so
/// the gateway can relay the upstream status and message.
#[async_trait]
pub trait LoginApi: Send + Sync {
    async fn login(&self, payload: &LoginPayload) -> Result<LoginApiResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs() {
        assert_eq!(CustomerQuery::All.query_pair(), None);
        assert_eq!(
            CustomerQuery::ByDate(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()).query_pair(),
            Some(("date", "2024-03-07".to_string()))
        );
        assert_eq!(
            CustomerQuery::BySalesPerson("Rakhi Sangwan".into()).query_pair(),
            Some(("salesPerson", "Rakhi Sangwan".to_string()))
        );
        assert_eq!(
            CustomerQuery::ByPhone("98".into()).query_pair(),
            Some(("phone", "98".to_string()))
        );
    }
}
