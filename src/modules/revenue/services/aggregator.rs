use futures_util::{Stream, TryStreamExt};
use rust_decimal::Decimal;

use crate::core::{AppError, Currency, Result};
use crate::modules::revenue::models::RevenueSummary;
use crate::modules::stripe::models::TransactionRecord;

/// Processor fee schedule: `amount * percentage + fixed` per transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    /// Fraction of the amount, e.g. 0.029 for 2.9%
    pub percentage: Decimal,
    /// Flat fee per transaction in the primary currency
    pub fixed: Decimal,
}

impl FeeSchedule {
    pub fn new(percentage: Decimal, fixed: Decimal) -> Self {
        Self { percentage, fixed }
    }

    /// Fee for one transaction amount in major units
    pub fn fee_for(&self, amount: Decimal) -> Result<Decimal> {
        amount
            .checked_mul(self.percentage)
            .and_then(|variable| variable.checked_add(self.fixed))
            .ok_or_else(|| AppError::internal(format!("Fee overflow for amount {}", amount)))
    }
}

impl Default for FeeSchedule {
    /// Stripe's standard card pricing: 2.9% + 0.30 USD
    fn default() -> Self {
        Self {
            percentage: Decimal::new(29, 3),
            fixed: Decimal::new(30, 2),
        }
    }
}

/// Running totals over succeeded transactions, exact to the cent fraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevenueTotals {
    /// Every record seen, whatever its status
    pub records_seen: u64,
    pub transaction_count: u64,
    pub gross: Decimal,
    pub fees: Decimal,
}

/// Folds transaction records into a [`RevenueSummary`].
///
/// Non-succeeded records are skipped entirely. Accumulation is exact
/// decimal arithmetic, so nothing drifts across many transactions.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    fees: FeeSchedule,
    exchange_rate: Decimal,
    primary: Currency,
    secondary: Currency,
}

impl Aggregator {
    pub fn new(fees: FeeSchedule, exchange_rate: Decimal) -> Self {
        Self {
            fees,
            exchange_rate,
            primary: Currency::USD,
            secondary: Currency::BOB,
        }
    }

    pub fn fee_schedule(&self) -> FeeSchedule {
        self.fees
    }

    pub fn exchange_rate(&self) -> Decimal {
        self.exchange_rate
    }

    /// Add one record to the running totals
    pub fn accumulate(&self, totals: RevenueTotals, record: &TransactionRecord) -> Result<RevenueTotals> {
        let totals = RevenueTotals {
            records_seen: totals.records_seen + 1,
            ..totals
        };
        if !record.status.is_revenue_bearing() {
            return Ok(totals);
        }

        let amount = self.primary.from_minor_units(record.amount);
        let fee = self.fees.fee_for(amount)?;
        let overflow = || AppError::internal(format!("Revenue total overflow at {}", record.id));

        Ok(RevenueTotals {
            records_seen: totals.records_seen,
            transaction_count: totals.transaction_count + 1,
            gross: totals.gross.checked_add(amount).ok_or_else(overflow)?,
            fees: totals.fees.checked_add(fee).ok_or_else(overflow)?,
        })
    }

    /// Derive net amounts from the final totals
    pub fn summarize(&self, totals: RevenueTotals) -> Result<RevenueSummary> {
        let net_primary = totals
            .gross
            .checked_sub(totals.fees)
            .ok_or_else(|| AppError::internal("Net revenue overflow"))?;
        let net_secondary = net_primary
            .checked_mul(self.exchange_rate)
            .ok_or_else(|| AppError::internal("Currency conversion overflow"))?;

        Ok(RevenueSummary {
            records_fetched: totals.records_seen,
            transaction_count: totals.transaction_count,
            gross_revenue: totals.gross,
            fees: totals.fees,
            net_primary,
            net_secondary,
            primary: self.primary,
            secondary: self.secondary,
            exchange_rate: self.exchange_rate,
        })
    }

    /// Aggregate an in-memory sequence of records
    pub fn aggregate<'a, I>(&self, records: I) -> Result<RevenueSummary>
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        let totals = records
            .into_iter()
            .try_fold(RevenueTotals::default(), |totals, record| {
                self.accumulate(totals, record)
            })?;
        self.summarize(totals)
    }

    /// Aggregate a fallible record stream in a single pass.
    ///
    /// The first error aborts the fold; no partial summary is produced.
    pub async fn aggregate_stream<S>(&self, records: S) -> Result<RevenueSummary>
    where
        S: Stream<Item = Result<TransactionRecord>>,
    {
        let totals = records
            .try_fold(RevenueTotals::default(), |totals, record| {
                let next = self.accumulate(totals, &record);
                async move { next }
            })
            .await?;
        self.summarize(totals)
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(FeeSchedule::default(), Decimal::new(696, 2))
    }
}
