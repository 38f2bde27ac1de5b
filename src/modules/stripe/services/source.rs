use async_trait::async_trait;

use crate::core::Result;
use crate::modules::stripe::models::TransactionPage;

/// Largest page the Stripe list endpoint will return
pub const MAX_PAGE_SIZE: u8 = 100;

/// Parameters for one page request against the list endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: u8,
    /// `created[gte]`, epoch seconds
    pub created_gte: i64,
    /// `created[lte]`, epoch seconds
    pub created_lte: i64,
    /// Id of the last record of the previous page; absent on the first request
    pub starting_after: Option<String>,
}

/// Paginated, read-only source of transaction records
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch one page of records created within the query's bounds
    async fn list_transactions(&self, query: &ListQuery) -> Result<TransactionPage>;

    /// Source name for logs
    fn name(&self) -> &str;
}
