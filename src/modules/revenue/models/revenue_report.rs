use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::serializers::decimal_as_number;
use crate::core::timezone::DATE_FORMAT;
use crate::core::{AppError, Currency, DateRange, ResolvedInstantRange, Result};

/// Inbound request: a local calendar date range
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRequest {
    /// Start date (inclusive, format: YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<String>,
    /// End date (inclusive, format: YYYY-MM-DD)
    #[serde(default)]
    pub end_date: Option<String>,
}

impl RevenueRequest {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
        }
    }

    /// Check presence and format of both dates before entering the pipeline
    pub fn validate(&self) -> Result<DateRange> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        match (present(&self.start_date), present(&self.end_date)) {
            (Some(start), Some(end)) => DateRange::parse(&start, &end),
            _ => Err(AppError::validation("Missing startDate or endDate")),
        }
    }
}

/// Unrounded aggregate over the succeeded transactions of a range.
///
/// All amounts keep full precision; rounding happens in [`RevenueReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueSummary {
    /// Records returned by the source, including non-succeeded ones
    pub records_fetched: u64,
    pub transaction_count: u64,
    pub gross_revenue: Decimal,
    pub fees: Decimal,
    pub net_primary: Decimal,
    pub net_secondary: Decimal,
    pub primary: Currency,
    pub secondary: Currency,
    pub exchange_rate: Decimal,
}

/// Echo of the requested range and the instants it resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDateRange {
    pub start: String,
    pub end: String,
    pub start_instant: i64,
    pub end_instant: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPair {
    pub primary: Currency,
    pub secondary: Currency,
    #[serde(serialize_with = "decimal_as_number")]
    pub exchange_rate: Decimal,
}

/// Response body, monetary fields rounded to two decimals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReport {
    pub transaction_count: u64,
    #[serde(serialize_with = "decimal_as_number")]
    pub gross_revenue: Decimal,
    /// Processor fees
    #[serde(serialize_with = "decimal_as_number")]
    pub fees: Decimal,
    #[serde(serialize_with = "decimal_as_number")]
    pub net_primary: Decimal,
    #[serde(serialize_with = "decimal_as_number")]
    pub net_secondary: Decimal,
    pub date_range: ReportDateRange,
    pub currencies: CurrencyPair,
}

impl RevenueReport {
    pub fn new(summary: &RevenueSummary, range: &DateRange, resolved: &ResolvedInstantRange) -> Self {
        let primary = summary.primary;
        let secondary = summary.secondary;

        Self {
            transaction_count: summary.transaction_count,
            gross_revenue: primary.round(summary.gross_revenue),
            fees: primary.round(summary.fees),
            net_primary: primary.round(summary.net_primary),
            net_secondary: secondary.round(summary.net_secondary),
            date_range: ReportDateRange {
                start: range.start.format(DATE_FORMAT).to_string(),
                end: range.end.format(DATE_FORMAT).to_string(),
                start_instant: resolved.start_instant,
                end_instant: resolved.end_instant,
            },
            currencies: CurrencyPair {
                primary,
                secondary,
                exchange_rate: summary.exchange_rate,
            },
        }
    }
}
