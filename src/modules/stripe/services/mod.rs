pub mod client;
pub mod fetcher;
pub mod source;

pub use client::StripeClient;
pub use fetcher::PaginatedFetcher;
pub use source::{ListQuery, TransactionSource, MAX_PAGE_SIZE};
