//! Date-period filter over record creation timestamps.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::GreError;
use crate::time::parse_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterPeriod {
    #[default]
    All,
    Today,
    Week,
    Month,
    SpecificMonth,
}

impl FilterPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterPeriod::All => "all",
            FilterPeriod::Today => "today",
            FilterPeriod::Week => "week",
            FilterPeriod::Month => "month",
            FilterPeriod::SpecificMonth => "specific-month",
        }
    }
}

impl fmt::Display for FilterPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterPeriod {
    type Err = GreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FilterPeriod::All),
            "today" => Ok(FilterPeriod::Today),
            "week" => Ok(FilterPeriod::Week),
            "month" => Ok(FilterPeriod::Month),
            "specific-month" => Ok(FilterPeriod::SpecificMonth),
            other => Err(GreError::validation(format!(
                "Unknown period '{}'. Expected one of: all, today, week, month, specific-month",
                other
            ))),
        }
    }
}

/// Records that carry a creation timestamp.
pub trait Timestamped {
    fn created_at(&self) -> &str;
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Parses a strict `YYYY-MM` month into its first day.
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    let (year, month) = raw.trim().split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

fn month_window(first: NaiveDate) -> Option<DateWindow> {
    let next = first.checked_add_months(chrono::Months::new(1))?;
    Some(DateWindow {
        start: first,
        end: next.pred_opt()?,
    })
}

/// Window selected by `period`; `None` means every record passes.
pub fn window_for(period: FilterPeriod, month: Option<&str>, today: NaiveDate) -> Option<DateWindow> {
    let back = |days: u64| DateWindow {
        start: today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN),
        end: today,
    };

    match period {
        FilterPeriod::All => None,
        FilterPeriod::Today => Some(back(0)),
        FilterPeriod::Week => Some(back(7)),
        FilterPeriod::Month => Some(back(30)),
        FilterPeriod::SpecificMonth => month.and_then(parse_month).and_then(month_window),
    }
}

/// Keeps the records whose creation date falls inside the selected window.
///
/// The calendar date is taken in the timestamp's own offset; offset-less
/// timestamps use `offset`. Unparseable timestamps never match a real window.
pub fn filter_by_period<T: Timestamped + Clone>(
    items: &[T],
    period: FilterPeriod,
    month: Option<&str>,
    today: NaiveDate,
    offset: FixedOffset,
) -> Vec<T> {
    let Some(window) = window_for(period, month, today) else {
        return items.to_vec();
    };

    items
        .iter()
        .filter(|item| {
            parse_timestamp(item.created_at(), offset)
                .is_some_and(|created| window.contains(created.date_naive()))
        })
        .cloned()
        .collect()
}
