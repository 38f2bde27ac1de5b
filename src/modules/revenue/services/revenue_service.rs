use std::sync::Arc;

use tracing::{error, info};

use super::aggregator::Aggregator;
use crate::config::RevenueConfig;
use crate::core::{RangeResolver, Result};
use crate::modules::revenue::models::{RevenueReport, RevenueRequest};
use crate::modules::stripe::services::{PaginatedFetcher, TransactionSource};

/// Runs the revenue pipeline: resolve the range, fetch every page, aggregate.
///
/// Each call is independent and read-only against the processor.
#[derive(Clone)]
pub struct RevenueService {
    resolver: RangeResolver,
    fetcher: PaginatedFetcher,
    aggregator: Aggregator,
}

impl RevenueService {
    pub fn new(resolver: RangeResolver, fetcher: PaginatedFetcher, aggregator: Aggregator) -> Self {
        Self {
            resolver,
            fetcher,
            aggregator,
        }
    }

    /// Wire the pipeline from configuration over the given source
    pub fn from_config(config: &RevenueConfig, source: Arc<dyn TransactionSource>) -> Result<Self> {
        Ok(Self::new(
            RangeResolver::from_offset_minutes(config.utc_offset_minutes)?,
            PaginatedFetcher::new(source),
            Aggregator::new(config.fee_schedule(), config.exchange_rate),
        ))
    }

    /// Generate the revenue report for a requested date range
    ///
    /// # Errors
    /// - `Validation` if either date is missing or malformed
    /// - `Upstream` if any page request fails; nothing fetched before the
    ///   failure is reported
    /// - `Internal` on decimal overflow
    pub async fn generate_report(&self, request: &RevenueRequest) -> Result<RevenueReport> {
        let range = request.validate()?;
        let resolved = self.resolver.resolve(&range)?;

        info!(
            start = %range.start,
            end = %range.end,
            start_instant = resolved.start_instant,
            end_instant = resolved.end_instant,
            source = self.fetcher.source_name(),
            "Generating revenue report"
        );

        let summary = self
            .aggregator
            .aggregate_stream(self.fetcher.records(&resolved))
            .await
            .map_err(|e| {
                error!(
                    start = %range.start,
                    end = %range.end,
                    error = %e,
                    "Failed to aggregate revenue"
                );
                e
            })?;

        info!(
            fetched = summary.records_fetched,
            transactions = summary.transaction_count,
            gross = %summary.primary.format_amount(summary.gross_revenue),
            net = %summary.secondary.format_amount(summary.net_secondary),
            "Revenue report generated"
        );

        Ok(RevenueReport::new(&summary, &range, &resolved))
    }
}
