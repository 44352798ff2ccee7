//! Filter state and the date → search → page pipeline.

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::pagination::{Page, paginate};
use super::period::{FilterPeriod, Timestamped, filter_by_period};
use super::search::{Searchable, search};
use crate::export::ExportOptions;

/// User-controlled view state for a record list.
///
/// `input_query` mirrors the search box; `query` is the debounced value that
/// actually drives filtering. Changing `query`, the period, the month or the
/// page size sends the view back to page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    input_query: String,
    query: String,
    period: FilterPeriod,
    month: Option<String>,
    page: usize,
    page_size: usize,
}

impl FilterState {
    pub fn new(page_size: usize) -> Self {
        Self {
            input_query: String::new(),
            query: String::new(),
            period: FilterPeriod::All,
            month: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn input_query(&self) -> &str {
        &self.input_query
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn period(&self) -> FilterPeriod {
        self.period
    }

    pub fn month(&self) -> Option<&str> {
        self.month.as_deref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Records a keystroke; filtering is unaffected until [`Self::commit_query`].
    pub fn set_input_query(&mut self, value: impl Into<String>) {
        self.input_query = value.into();
    }

    /// Applies the settled search value.
    pub fn commit_query(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value != self.query {
            self.query = value;
            self.page = 1;
        }
    }

    /// Sets both the box and the filter value at once, bypassing debounce.
    pub fn set_query_now(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.input_query = value.clone();
        self.commit_query(value);
    }

    pub fn set_period(&mut self, period: FilterPeriod) {
        if period != self.period {
            self.period = period;
            self.page = 1;
        }
    }

    pub fn set_month(&mut self, month: Option<String>) {
        if month != self.month {
            self.month = month;
            self.page = 1;
        }
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        if page_size != self.page_size {
            self.page_size = page_size;
            self.page = 1;
        }
    }

    /// Requests a page; the pipeline clamps it on evaluation.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Date filter then search, without pagination.
    pub fn filter<T>(&self, items: &[T], today: NaiveDate, offset: FixedOffset) -> Vec<T>
    where
        T: Searchable + Timestamped + Clone,
    {
        let dated = filter_by_period(items, self.period, self.month.as_deref(), today, offset);
        search(&dated, &self.query)
    }

    /// Full pipeline: date filter, search, then the current page.
    pub fn apply<T>(&self, items: &[T], today: NaiveDate, offset: FixedOffset) -> Page<T>
    where
        T: Searchable + Timestamped + Clone,
    {
        paginate(&self.filter(items, today, offset), self.page, self.page_size)
    }

    /// Description of the active filters for export file naming.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            period: self.period,
            selected_month: self.month.clone(),
            search_term: Some(self.query.trim().to_string()).filter(|q| !q.is_empty()),
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ist;

    #[derive(Clone, Debug, PartialEq)]
    struct Lead {
        name: &'static str,
        created_at: &'static str,
    }

    impl Searchable for Lead {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name]
        }
    }

    impl Timestamped for Lead {
        fn created_at(&self) -> &str {
            self.created_at
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn leads() -> Vec<Lead> {
        vec![
            Lead { name: "Asha today", created_at: "2024-03-15T10:00:00+05:30" },
            Lead { name: "Asha old", created_at: "2023-01-01T10:00:00+05:30" },
            Lead { name: "Vikram today", created_at: "2024-03-15T11:00:00+05:30" },
        ]
    }

    #[test]
    fn test_date_then_search() {
        let mut state = FilterState::new(30);
        state.set_period(FilterPeriod::Today);
        state.commit_query("asha");

        let page = state.apply(&leads(), today(), ist());
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Asha today");
    }

    #[test]
    fn test_input_does_not_filter_until_committed() {
        let mut state = FilterState::new(30);
        state.set_input_query("vikram");
        assert_eq!(state.apply(&leads(), today(), ist()).total_items, 3);

        state.commit_query("vikram");
        assert_eq!(state.apply(&leads(), today(), ist()).total_items, 1);
    }

    #[test]
    fn test_changes_reset_page() {
        let mut state = FilterState::new(1);
        state.set_page(3);
        assert_eq!(state.page(), 3);
        state.commit_query("a");
        assert_eq!(state.page(), 1);

        state.set_page(2);
        state.set_period(FilterPeriod::Week);
        assert_eq!(state.page(), 1);

        state.set_page(2);
        state.set_month(Some("2024-03".into()));
        assert_eq!(state.page(), 1);

        state.set_page(2);
        state.set_page_size(10);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_unchanged_value_keeps_page() {
        let mut state = FilterState::new(1);
        state.set_page(2);
        state.set_period(FilterPeriod::All);
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_requested_page_is_clamped() {
        let mut state = FilterState::new(2);
        state.set_page(10);
        let page = state.apply(&leads(), today(), ist());
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_export_options_reflect_state() {
        let mut state = FilterState::default();
        state.set_period(FilterPeriod::SpecificMonth);
        state.set_month(Some("2024-02".into()));
        state.commit_query("  ");
        let options = state.export_options();
        assert_eq!(options.period, FilterPeriod::SpecificMonth);
        assert_eq!(options.search_term, None);
    }
}
