//! Active sales sessions.

pub mod display;
mod envelope;
mod model;

pub use display::{format_session_duration, format_start_time};
pub use envelope::{SessionEnvelope, normalize_sessions};
pub use model::ActiveSession;

use crate::filter::Searchable;

impl Searchable for ActiveSession {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.sales_person_name.as_str(), self.customer_name.as_str()]
    }
}
