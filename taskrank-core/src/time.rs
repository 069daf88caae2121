//! Evaluation-date helpers.
//!
//! The engine takes "today" as a parameter; these helpers pick it from a
//! timezone or a command-line string.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Calendar date of `now` in the IANA zone `tz`, e.g. "America/Chicago".
pub fn date_in(now: DateTime<Utc>, tz: &str) -> Result<NaiveDate, TimeError> {
    let zone: Tz = tz
        .parse()
        .map_err(|_| TimeError::InvalidTimezone(tz.to_string()))?;
    Ok(now.with_timezone(&zone).date_naive())
}

pub fn today_in(tz: &str) -> Result<NaiveDate, TimeError> {
    date_in(Utc::now(), tz)
}

pub fn parse_date(value: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| TimeError::InvalidDate(value.to_string()))
}
