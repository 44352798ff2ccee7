//! Search, date-period filtering and pagination over in-memory record sets.
//!
//! Every stage is a pure function of its inputs; [`FilterState`] composes them
//! in the fixed order date → search → page.

mod pagination;
mod period;
mod pipeline;
mod search;

pub use pagination::{Page, clamp_page, paginate, total_pages};
pub use period::{DateWindow, FilterPeriod, Timestamped, filter_by_period, parse_month, window_for};
pub use pipeline::FilterState;
pub use search::{Searchable, matches, search};
