//! In-memory API doubles shared by the use-case tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use gre_core::api::{CustomerQuery, DashboardApi, LoginApi};
use gre_core::auth::model::{LoginApiResponse, LoginPayload};
use gre_core::auth::{MemoryStorage, SessionStore, UserData};
use gre_core::customer::{Customer, CustomerPatch};
use gre_core::sales_person::SalesPerson;
use gre_core::session::ActiveSession;
use gre_core::{GreError, Result};

pub fn user(full_name: &str) -> UserData {
    UserData {
        user_id: "u-1".to_string(),
        email: "gre@krisala.com".to_string(),
        full_name: full_name.to_string(),
        permissions: vec![],
    }
}

pub fn logged_in_store() -> Arc<SessionStore> {
    let store = SessionStore::new(Arc::new(MemoryStorage::new()));
    store.login(user("Mohini Jadhav"), "token-1", false).unwrap();
    Arc::new(store)
}

pub fn session(id: &str, sales_person: &str, customer: &str) -> ActiveSession {
    ActiveSession {
        session_id: id.to_string(),
        sales_person_name: sales_person.to_string(),
        customer_name: customer.to_string(),
        is_active: true,
        ..Default::default()
    }
}

pub fn customer(id: &str, name: &str, created_at: &str) -> Customer {
    Customer {
        record_id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@mail.com", name.to_lowercase()),
        phone: "9876543210".to_string(),
        created_at: created_at.to_string(),
        ..Default::default()
    }
}

/// Scripted [`DashboardApi`]: session fetches pop queued results and fall back
/// to an empty list; customer calls serve a fixed list.
#[derive(Default)]
pub struct MockDashboardApi {
    session_results: Mutex<VecDeque<Result<Vec<ActiveSession>>>>,
    customers: Mutex<Vec<Customer>>,
    session_calls: AtomicUsize,
    session_delay: Mutex<Option<Duration>>,
    customer_queries: Mutex<Vec<CustomerQuery>>,
}

impl MockDashboardApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_customers(customers: Vec<Customer>) -> Arc<Self> {
        let api = Self::default();
        *api.customers.lock().unwrap() = customers;
        Arc::new(api)
    }

    pub fn queue_sessions(&self, result: Result<Vec<ActiveSession>>) {
        self.session_results.lock().unwrap().push_back(result);
    }

    /// Every later session fetch takes `delay` before answering.
    pub fn set_session_delay(&self, delay: Duration) {
        *self.session_delay.lock().unwrap() = Some(delay);
    }

    pub fn session_calls(&self) -> usize {
        self.session_calls.load(Ordering::SeqCst)
    }

    pub fn customer_queries(&self) -> Vec<CustomerQuery> {
        self.customer_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl DashboardApi for MockDashboardApi {
    async fn fetch_active_sessions(&self, token: Option<&str>) -> Result<Vec<ActiveSession>> {
        self.session_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.session_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        token.ok_or_else(GreError::missing_token)?;
        self.session_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_customers(
        &self,
        token: Option<&str>,
        query: &CustomerQuery,
    ) -> Result<Vec<Customer>> {
        token.ok_or_else(GreError::missing_token)?;
        self.customer_queries.lock().unwrap().push(query.clone());
        Ok(self.customers.lock().unwrap().clone())
    }

    async fn update_customer(
        &self,
        token: Option<&str>,
        id: &str,
        patch: &CustomerPatch,
    ) -> Result<Customer> {
        token.ok_or_else(GreError::missing_token)?;
        let mut customers = self.customers.lock().unwrap();
        let customer = customers
            .iter_mut()
            .find(|c| c.has_id(id))
            .ok_or_else(|| GreError::not_found("Customer", id))?;
        if let Some(name) = patch.fields().get("name").and_then(|v| v.as_str()) {
            customer.name = name.to_string();
        }
        Ok(customer.clone())
    }

    async fn fetch_sales_people(&self, token: Option<&str>) -> Result<Vec<SalesPerson>> {
        token.ok_or_else(GreError::missing_token)?;
        Ok(Vec::new())
    }
}

/// [`LoginApi`] answering every call with one canned response.
pub struct MockLoginApi {
    response: LoginApiResponse,
    pub calls: AtomicUsize,
}

impl MockLoginApi {
    pub fn new(response: LoginApiResponse) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl LoginApi for MockLoginApi {
    async fn login(&self, _payload: &LoginPayload) -> Result<LoginApiResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}
