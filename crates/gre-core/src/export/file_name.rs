use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::filter::{FilterPeriod, parse_month};

/// Description of the filters that produced an export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub period: FilterPeriod,
    pub search_term: Option<String>,
    pub selected_month: Option<String>,
}

pub const EXPORT_EXTENSION: &str = "csv";

/// `<prefix>_<YYYY-MM-DD>_<HH-MM-SS><suffix>.csv`.
///
/// The suffix names the period (`_Feb 2024` for a specific month, `_week`
/// for a rolling period, nothing for `all`) plus `_search-<term>` with the
/// term cut to ten characters.
pub fn generate_file_name(
    options: &ExportOptions,
    prefix: &str,
    now: DateTime<FixedOffset>,
) -> String {
    let mut suffix = String::new();

    let month = match options.period {
        FilterPeriod::SpecificMonth => options.selected_month.as_deref().and_then(parse_month),
        _ => None,
    };
    match (month, options.period) {
        (Some(first_day), _) => suffix.push_str(&format!("_{}", first_day.format("%b %Y"))),
        (None, FilterPeriod::All) => {}
        (None, period) => suffix.push_str(&format!("_{}", period)),
    }

    if let Some(term) = options.search_term.as_deref().filter(|t| !t.is_empty()) {
        let short: String = term.chars().take(10).collect();
        suffix.push_str(&format!("_search-{}", short));
    }

    format!(
        "{}_{}_{}{}.{}",
        prefix,
        now.format("%Y-%m-%d"),
        now.format("%H-%M-%S"),
        suffix,
        EXPORT_EXTENSION
    )
}
