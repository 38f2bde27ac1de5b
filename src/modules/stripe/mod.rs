pub mod models;
pub mod services;

pub use models::{TransactionPage, TransactionRecord, TransactionStatus};
pub use services::{ListQuery, PaginatedFetcher, StripeClient, TransactionSource};
