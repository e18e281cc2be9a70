//! Date helpers for the birth-date rule.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};

/// Source of "today" for time-dependent rules.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the local calendar date on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses the date formats a browser date input or a JSON client may send:
/// `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.fff]]` and RFC 3339.
///
/// Returns `None` for anything else, including impossible dates like `2001-02-30`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }

    if let Some(timestamp) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Some(timestamp.date());
    }

    parse_partial_date(value)
}

fn parse_partial_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('-');
    let year = parts.next().filter(|year| year.len() == 4)?;
    let month = match parts.next() {
        Some(month) if month.len() == 2 => month.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };
    if parts.next().is_some() || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

/// Age by calendar-year subtraction: month and day are ignored, so someone
/// born in December is counted a full year older from January 1st.
pub fn years_between(birth: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - birth.year()
}
