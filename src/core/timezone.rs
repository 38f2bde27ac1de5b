use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::Serialize;

use crate::core::{AppError, Result};

/// Calendar date format accepted from callers
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Local calendar date range, inclusive on both ends.
///
/// `start <= end` is not enforced. An inverted range resolves to instants
/// with `start_instant > end_instant` and matches no transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse a pair of `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: parse_date("startDate", start)?,
            end: parse_date("endDate", end)?,
        })
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("Missing {}", field)));
    }

    let invalid = || {
        AppError::validation(format!(
            "Invalid {} format: '{}'. Expected YYYY-MM-DD",
            field, value
        ))
    };

    // chrono alone accepts unpadded fields and signed years
    if !has_iso_date_shape(value) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

/// Exactly `DDDD-DD-DD` in ASCII digits
fn has_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Absolute boundaries of a [`DateRange`] as epoch seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedInstantRange {
    pub start_instant: i64,
    pub end_instant: i64,
}

impl ResolvedInstantRange {
    pub fn is_inverted(&self) -> bool {
        self.start_instant > self.end_instant
    }

    pub fn contains(&self, instant: i64) -> bool {
        self.start_instant <= instant && instant <= self.end_instant
    }
}

/// Interprets calendar dates in the business's fixed UTC offset.
///
/// The host timezone never participates: `2024-01-01` at UTC-4 always starts
/// at `2024-01-01T04:00:00Z`.
#[derive(Debug, Clone, Copy)]
pub struct RangeResolver {
    offset: FixedOffset,
}

impl RangeResolver {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Build a resolver from an offset in minutes east of UTC (UTC-4 is -240)
    pub fn from_offset_minutes(minutes: i32) -> Result<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
            .ok_or_else(|| {
                AppError::Configuration(format!("Invalid UTC offset: {} minutes", minutes))
            })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// First instant of `start` through 23:59:59 of `end`, both in the fixed offset
    pub fn resolve(&self, range: &DateRange) -> Result<ResolvedInstantRange> {
        let day_end = NaiveTime::from_hms_opt(23, 59, 59)
            .ok_or_else(|| AppError::internal("Invalid end-of-day time"))?;

        Ok(ResolvedInstantRange {
            start_instant: self.to_epoch(range.start.and_time(NaiveTime::MIN))?,
            end_instant: self.to_epoch(range.end.and_time(day_end))?,
        })
    }

    fn to_epoch(&self, local: NaiveDateTime) -> Result<i64> {
        self.offset
            .from_local_datetime(&local)
            .single()
            .map(|instant| instant.timestamp())
            .ok_or_else(|| AppError::validation(format!("Date out of range: {}", local.date())))
    }
}
