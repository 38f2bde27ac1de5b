pub mod aggregator;
pub mod revenue_service;

pub use aggregator::{Aggregator, FeeSchedule, RevenueTotals};
pub use revenue_service::RevenueService;
