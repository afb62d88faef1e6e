//! ISO-8601 date parsing and inclusive calendar windows.

use chrono::{Days, NaiveDate, NaiveDateTime, Utc};

use crate::error::{PhenographError, Result};

/// A date guaranteed to precede any curation activity.
pub fn distant_past() -> NaiveDate {
    NaiveDate::from_ymd_opt(1000, 1, 1).expect("1000-01-01 is a valid date")
}

/// Parse `YYYY-MM-DD` or `YYYY-MM-DDThh:mm:ss(.fff)?Z` into a date.
///
/// Only the year, month, and day are significant; any time-of-day payload is
/// discarded.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ") {
        return Ok(datetime.date());
    }
    Err(PhenographError::MalformedDate(s.to_string()))
}

/// An inclusive `[lower, upper]` calendar window.
///
/// A typical use case is to ask whether an annotation was curated between
/// 2015 and 2018.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    lower: NaiveDate,
    upper: NaiveDate,
}

impl DateWindow {
    pub fn new(lower: NaiveDate, upper: NaiveDate) -> Self {
        DateWindow { lower, upper }
    }

    /// Build a window from optional ISO-date strings.
    ///
    /// An absent lower bound defaults to [`distant_past`]. An absent upper
    /// bound defaults to today plus 42 days, so that "the present" is always
    /// inside the window.
    pub fn from_bounds(lower: Option<&str>, upper: Option<&str>) -> Result<Self> {
        let lower = match lower {
            Some(s) => parse_iso_date(s)?,
            None => distant_past(),
        };
        let upper = match upper {
            Some(s) => parse_iso_date(s)?,
            None => Utc::now()
                .date_naive()
                .checked_add_days(Days::new(42))
                .unwrap_or(NaiveDate::MAX),
        };
        Ok(DateWindow { lower, upper })
    }

    /// Test `lower <= date <= upper`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.lower <= date && date <= self.upper
    }

    pub fn lower(&self) -> NaiveDate {
        self.lower
    }

    pub fn upper(&self) -> NaiveDate {
        self.upper
    }
}
