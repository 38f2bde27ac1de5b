use std::sync::Arc;

use futures_util::stream::{self, BoxStream, StreamExt, TryStreamExt};
use tracing::debug;

use super::source::{ListQuery, TransactionSource, MAX_PAGE_SIZE};
use crate::core::{AppError, ResolvedInstantRange, Result};
use crate::modules::stripe::models::TransactionRecord;

/// Where the next page request starts
enum Cursor {
    First,
    After(String),
    Exhausted,
}

/// Walks cursor-based pagination over a [`TransactionSource`].
///
/// Pages are requested strictly in sequence since each request needs the
/// cursor of the previous response. Records come out in source order.
#[derive(Clone)]
pub struct PaginatedFetcher {
    source: Arc<dyn TransactionSource>,
    page_size: u8,
}

impl PaginatedFetcher {
    pub fn new(source: Arc<dyn TransactionSource>) -> Self {
        Self {
            source,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Override the page size, clamped to `1..=MAX_PAGE_SIZE`
    pub fn with_page_size(mut self, page_size: u8) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Lazily stream every record created within `range`.
    ///
    /// The stream ends after the first error; consumers must treat an error
    /// as fatal for the whole range. A page that claims more results but
    /// carries no records yields an upstream error since it offers no cursor.
    pub fn records(&self, range: &ResolvedInstantRange) -> BoxStream<'static, Result<TransactionRecord>> {
        if range.is_inverted() {
            debug!(
                start_instant = range.start_instant,
                end_instant = range.end_instant,
                "Inverted range, skipping fetch"
            );
            return stream::empty::<Result<TransactionRecord>>().boxed();
        }

        let source = Arc::clone(&self.source);
        let limit = self.page_size;
        let (created_gte, created_lte) = (range.start_instant, range.end_instant);

        stream::try_unfold(Cursor::First, move |cursor| {
            let source = Arc::clone(&source);
            async move {
                let starting_after = match cursor {
                    Cursor::Exhausted => return Ok(None),
                    Cursor::First => None,
                    Cursor::After(id) => Some(id),
                };

                let query = ListQuery {
                    limit,
                    created_gte,
                    created_lte,
                    starting_after,
                };
                let page = source.list_transactions(&query).await?;

                debug!(
                    source = source.name(),
                    records = page.data.len(),
                    has_more = page.has_more,
                    starting_after = ?query.starting_after,
                    "Fetched transaction page"
                );

                let next = if !page.has_more {
                    Cursor::Exhausted
                } else {
                    match page.next_cursor() {
                        Some(id) => Cursor::After(id.to_string()),
                        None => {
                            return Err(AppError::upstream(format!(
                                "{} reported more results after an empty page",
                                source.name()
                            )))
                        }
                    }
                };

                Ok::<_, AppError>(Some((page.data, next)))
            }
        })
        .map_ok(|records| stream::iter(records.into_iter().map(Ok::<_, AppError>)))
        .try_flatten()
        .boxed()
    }

    /// Collect every record created within `range`
    pub async fn fetch_all(&self, range: &ResolvedInstantRange) -> Result<Vec<TransactionRecord>> {
        self.records(range).try_collect().await
    }
}
