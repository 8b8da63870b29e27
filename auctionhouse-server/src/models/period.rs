//! Reporting period filter
//!
//! Inclusive `[start, end]` date range used to scope reports. Missing bounds
//! fall back to the trailing 30 days ending today.

use chrono::{Duration, Local, NaiveDate};
use serde::Deserialize;

use super::validation::parse_date;
use super::ValidationError;

/// Length of the default reporting window
pub const DEFAULT_PERIOD_DAYS: i64 = 30;

/// Inclusive date range, compared at day granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Raw `?start=&end=` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeriodParams {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The `days`-long window ending on `today`.
    pub fn trailing(today: NaiveDate, days: i64) -> Self {
        Self {
            start: today - Duration::days(days),
            end: today,
        }
    }

    /// Resolve query parameters against `today`.
    ///
    /// Blank values use the default bound. A start after the end is allowed
    /// and simply matches nothing.
    pub fn resolve(params: &PeriodParams, today: NaiveDate) -> Result<Self, ValidationError> {
        let default = Self::trailing(today, DEFAULT_PERIOD_DAYS);

        let start = match non_blank(&params.start) {
            Some(raw) => parse_date("start", raw)?,
            None => default.start,
        };
        let end = match non_blank(&params.end) {
            Some(raw) => parse_date("end", raw)?,
            None => default.end,
        };

        Ok(Self { start, end })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Today's date in server local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_to_trailing_thirty_days() {
        let period = Period::resolve(&PeriodParams::default(), day(2024, 5, 31)).unwrap();
        assert_eq!(period, Period::new(day(2024, 5, 1), day(2024, 5, 31)));
    }

    #[test]
    fn blank_values_use_defaults() {
        let params = PeriodParams {
            start: Some("".into()),
            end: Some("  ".into()),
        };
        let period = Period::resolve(&params, day(2024, 5, 31)).unwrap();
        assert_eq!(period.end, day(2024, 5, 31));
    }

    #[test]
    fn bounds_resolve_independently() {
        let params = PeriodParams {
            start: Some("2024-01-01".into()),
            end: None,
        };
        let period = Period::resolve(&params, day(2024, 5, 31)).unwrap();
        assert_eq!(period, Period::new(day(2024, 1, 1), day(2024, 5, 31)));
    }

    #[test]
    fn rejects_garbage() {
        let params = PeriodParams {
            start: None,
            end: Some("last week".into()),
        };
        let err = Period::resolve(&params, day(2024, 5, 31)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "end", .. }));
    }

    #[test]
    fn inverted_range_is_not_an_error() {
        let params = PeriodParams {
            start: Some("2024-06-01".into()),
            end: Some("2024-05-01".into()),
        };
        let period = Period::resolve(&params, day(2024, 5, 31)).unwrap();
        assert_eq!(period, Period::new(day(2024, 6, 1), day(2024, 5, 1)));
    }
}
