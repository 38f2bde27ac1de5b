pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::configure;
pub use models::{RevenueReport, RevenueRequest, RevenueSummary};
pub use services::{Aggregator, FeeSchedule, RevenueService};
