//! Date keys and school-day windows.
//!
//! Feeds carry day dates in several shapes (`2025-10-06`, `2025-10-06T00:00:00`,
//! `10/6/2025`, `10-6-2025`). Everything is reduced to a calendar date and
//! joined against the wanted window through its `YYYY-MM-DD` key.

use chrono::{Datelike, NaiveDate, Weekday};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn month_day_year() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{1,2})([/-])(\d{1,2})([/-])(\d{4})$").expect("valid date pattern")
    })
}

/// Parse a feed date into a calendar date.
///
/// Tries ISO `YYYY-MM-DD` on the first ten characters (any time-of-day or
/// offset suffix is dropped without conversion), then `M/D/YYYY` and
/// `M-D-YYYY`. Returns `None` for anything else.
///
/// # Example
/// ```
/// use menufeed::dates::parse_menu_date;
///
/// let d = parse_menu_date("2025-10-06T11:30:00-05:00").unwrap();
/// assert_eq!(d.to_string(), "2025-10-06");
/// assert_eq!(parse_menu_date("10/6/2025"), Some(d));
/// ```
pub fn parse_menu_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    if let Some(prefix) = text.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date);
        }
    }

    let caps = month_day_year().captures(text)?;
    if caps[2] != caps[4] {
        return None;
    }

    let month = caps[1].parse().ok()?;
    let day = caps[3].parse().ok()?;
    let year = caps[5].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Canonical `YYYY-MM-DD` key for a date.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `M-D-YYYY` without leading zeros, as the FamilyMenu query expects.
pub fn api_date(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.month(), date.day(), date.year())
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The next `count` days starting at `start` (inclusive), optionally
/// skipping Saturdays and Sundays.
pub fn school_days(start: NaiveDate, count: usize, skip_weekends: bool) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut current = start;

    while days.len() < count {
        if !(skip_weekends && is_weekend(current)) {
            days.push(current);
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    days
}

/// Set of date keys an extraction should keep.
///
/// Keys sort in date order, so `first`/`last` give the request range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WantedDates {
    dates: BTreeMap<String, NaiveDate>,
}

impl WantedDates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates.into_iter().collect()
    }

    pub fn insert(&mut self, date: NaiveDate) {
        self.dates.insert(date_key(date), date);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.dates.contains_key(key)
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.values().next().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.values().next_back().copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.dates.keys().map(String::as_str)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.values().copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<NaiveDate> for WantedDates {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        let mut wanted = WantedDates::new();
        for date in iter {
            wanted.insert(date);
        }
        wanted
    }
}
