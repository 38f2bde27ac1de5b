pub mod transaction;

pub use transaction::{TransactionPage, TransactionRecord, TransactionStatus};
