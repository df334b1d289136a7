//! Calendar helpers: date parsing for the two accepted input formats, month
//! keys and day-of-month ordinals.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// `dd-MMM-yy`, e.g. `12-Aug-24`.
const SHORT_MONTH_FORMAT: &str = "%d-%b-%y";
/// `MM/dd/yyyy`, e.g. `08/12/2024`.
const US_SLASH_FORMAT: &str = "%m/%d/%Y";

/// Parse a record date. Returns `None` for anything that is not `dd-MMM-yy`
/// or `MM/dd/yyyy`; never panics.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if s.contains('/') {
        // chrono's %Y accepts any digit count; the contract wants four.
        let year = s.rsplit('/').next()?;
        if year.len() != 4 {
            return None;
        }
        return NaiveDate::parse_from_str(s, US_SLASH_FORMAT).ok();
    }
    NaiveDate::parse_from_str(s, SHORT_MONTH_FORMAT).ok()
}

/// Parse an optional date field, treating a missing value like a malformed one.
pub fn parse_optional(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(parse_date)
}

/// English ordinal suffix for a day of month (`1st`, `2nd`, `11th`, `23rd`).
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Calendar month identity used to bucket milestones. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based month number.
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// First calendar day of this month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Parse the `"{year}-{month:02}"` form produced by `Display`.
    pub fn parse(key: &str) -> Option<Self> {
        let (y, m) = key.split_once('-')?;
        let year = y.parse().ok()?;
        let month: u32 = m.parse().ok()?;
        (1..=12).contains(&month).then_some(Self::new(year, month))
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Short axis label for a month, e.g. `Jan 25`.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %y").to_string()
}

// tests live in tests/dates.rs
