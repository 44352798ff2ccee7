//! Customer list view model: fetch once, then filter, page and export locally.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use gre_core::Result;
use gre_core::api::{CustomerQuery, DashboardApi};
use gre_core::auth::SessionStore;
use gre_core::config::DashboardConfig;
use gre_core::customer::{Customer, CustomerPatch};
use gre_core::export::{ExportFile, ExportKind, build_export};
use gre_core::filter::{FilterPeriod, FilterState, Page};
use gre_core::time::today_in;

use crate::debounce::Debouncer;

#[derive(Default)]
struct BrowserState {
    customers: Vec<Customer>,
    filter: FilterState,
    /// Number of debounced search values applied so far.
    settled_searches: usize,
}

pub struct CustomerBrowser {
    api: Arc<dyn DashboardApi>,
    session: Arc<SessionStore>,
    offset: FixedOffset,
    state: Arc<Mutex<BrowserState>>,
    search_input: Debouncer<String>,
}

impl CustomerBrowser {
    /// Must be called inside a Tokio runtime (the search debouncer is a task).
    pub fn new(
        api: Arc<dyn DashboardApi>,
        session: Arc<SessionStore>,
        config: &DashboardConfig,
    ) -> Self {
        Self::with_debounce(api, session, config, config.search.debounce())
    }

    pub fn with_debounce(
        api: Arc<dyn DashboardApi>,
        session: Arc<SessionStore>,
        config: &DashboardConfig,
        debounce: Duration,
    ) -> Self {
        let state = Arc::new(Mutex::new(BrowserState {
            filter: FilterState::new(config.search.default_page_size),
            ..Default::default()
        }));

        let settled = Arc::clone(&state);
        let search_input = Debouncer::spawn(debounce, move |query: String| {
            let mut state = settled.lock().unwrap_or_else(PoisonError::into_inner);
            tracing::debug!(query = %query, "Search settled");
            state.filter.commit_query(query);
            state.settled_searches += 1;
        });

        Self {
            api,
            session,
            offset: config.timezone(),
            state,
            search_input,
        }
    }

    fn lock(&self) -> MutexGuard<'_, BrowserState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the record set with a fresh fetch; returns the record count.
    pub async fn load(&self, query: &CustomerQuery) -> Result<usize> {
        let token = self.session.token();
        let customers = self
            .api
            .fetch_customers(token.as_deref(), query)
            .await
            .inspect_err(|e| tracing::error!(error = %e, ?query, "Failed to load customers"))?;

        let count = customers.len();
        self.lock().customers = customers;
        Ok(count)
    }

    /// Keystroke in the search box; filtering follows once typing pauses.
    pub fn type_search(&self, value: impl Into<String>) {
        let value = value.into();
        self.lock().filter.set_input_query(value.clone());
        self.search_input.push(value);
    }

    /// Applies a search without waiting for the debounce.
    pub fn search_now(&self, value: impl Into<String>) {
        self.lock().filter.set_query_now(value);
    }

    pub fn set_period(&self, period: FilterPeriod) {
        self.lock().filter.set_period(period);
    }

    pub fn set_month(&self, month: Option<String>) {
        self.lock().filter.set_month(month);
    }

    pub fn set_page(&self, page: usize) {
        self.lock().filter.set_page(page);
    }

    pub fn set_page_size(&self, page_size: usize) {
        self.lock().filter.set_page_size(page_size);
    }

    pub fn filter_state(&self) -> FilterState {
        self.lock().filter.clone()
    }

    pub fn settled_searches(&self) -> usize {
        self.lock().settled_searches
    }

    pub fn total_loaded(&self) -> usize {
        self.lock().customers.len()
    }

    fn today(&self) -> chrono::NaiveDate {
        today_in(self.offset)
    }

    /// Current page of the date-filtered, searched list.
    pub fn current_page(&self) -> Page<Customer> {
        let today = self.today();
        let state = self.lock();
        state.filter.apply(&state.customers, today, self.offset)
    }

    /// Every record passing the active filters, unpaged.
    pub fn filtered(&self) -> Vec<Customer> {
        let today = self.today();
        let state = self.lock();
        state.filter.filter(&state.customers, today, self.offset)
    }

    /// Exports exactly what the filters currently show, across all pages.
    pub fn export(&self, kind: ExportKind) -> Result<ExportFile> {
        self.export_at(kind, Utc::now().with_timezone(&self.offset))
    }

    pub fn export_at(&self, kind: ExportKind, now: DateTime<FixedOffset>) -> Result<ExportFile> {
        let options = self.lock().filter.export_options();
        build_export(kind, &self.filtered(), &options, now)
    }

    /// Sends a partial update and swaps the returned record into the list.
    ///
    /// `id` may be the public id shown to users or the store id.
    pub async fn update_customer(&self, id: &str, patch: &CustomerPatch) -> Result<Customer> {
        let token = self.session.token();
        let updated = self.api.update_customer(token.as_deref(), id, patch).await?;

        let mut state = self.lock();
        if let Some(existing) = state.customers.iter_mut().find(|c| c.has_id(id)) {
            *existing = updated.clone();
        }
        tracing::info!(id, "Customer updated");
        Ok(updated)
    }
}
