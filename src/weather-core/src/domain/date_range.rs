use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    date_range_error::{InvalidDateSnafu, InvalidRangeSnafu, RangeTooLongSnafu},
    DateRangeError,
};

/// Largest allowed difference in days between start and end, giving at most
/// five calendar days including both ends.
pub const MAX_RANGE_DAYS: i64 = 4;

/// An inclusive range of calendar days that a forecast can cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<DateRange, DateRangeError> {
        if start > end {
            return InvalidRangeSnafu { start, end }.fail();
        }

        let days = (end - start).num_days();
        if days > MAX_RANGE_DAYS {
            return RangeTooLongSnafu { start, end, days }.fail();
        }

        Ok(DateRange { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<DateRange, DateRangeError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, the latter reduced to
/// its UTC calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateRangeError> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| {
            DateTime::parse_from_rfc3339(value).map(|v| v.with_timezone(&Utc).date_naive())
        })
        .map_err(|_| InvalidDateSnafu { value }.build())
}
