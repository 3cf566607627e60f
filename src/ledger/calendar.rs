use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// Canonical textual date format (`2024-01-31`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a calendar date in [`DATE_FORMAT`].
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| LedgerError::InvalidDate(text.to_string()))
}

/// Half-open run of calendar days, `[start_inclusive, end_exclusive)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start_inclusive: NaiveDate,
    pub end_exclusive: NaiveDate,
}

impl DateRange {
    pub fn new(start_inclusive: NaiveDate, end_exclusive: NaiveDate) -> Result<Self> {
        if end_exclusive < start_inclusive {
            return Err(LedgerError::InvalidDateRange {
                start: start_inclusive,
                end: end_exclusive,
            });
        }
        Ok(Self {
            start_inclusive,
            end_exclusive,
        })
    }

    /// Number of days covered; zero for an empty range.
    pub fn num_days(&self) -> i64 {
        (self.end_exclusive - self.start_inclusive).num_days().max(0)
    }

    /// Iterates the days of the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start_inclusive;
        (0..self.num_days()).map(move |offset| start + Duration::days(offset))
    }
}

/// Every day from `first` through `last`, both inclusive. Empty when
/// `last < first`.
pub fn days_inclusive(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let span = (last - first).num_days() + 1;
    (0..span.max(0)).map(move |offset| first + Duration::days(offset))
}
