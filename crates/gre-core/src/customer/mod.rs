//! Customer leads.

mod model;

pub use model::{Customer, CustomerPatch};

use serde_json::Value;

use crate::decode::{array_or_data, decode_items};
use crate::filter::{Searchable, Timestamped};

impl Searchable for Customer {
    fn search_fields(&self) -> Vec<&str> {
        [
            Some(self.name.as_str()),
            Some(self.email.as_str()),
            Some(self.phone.as_str()),
            self.sales_person.as_deref(),
            self.location.as_deref(),
            self.project_visited.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Timestamped for Customer {
    fn created_at(&self) -> &str {
        &self.created_at
    }
}

/// Decodes a customer list body (bare array or `{data: [...]}`).
pub fn decode_customers(body: Value) -> Vec<Customer> {
    decode_items(array_or_data(body, "customer"), "customer")
}
