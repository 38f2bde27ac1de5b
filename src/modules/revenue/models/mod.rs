pub mod revenue_report;

pub use revenue_report::{
    CurrencyPair, ReportDateRange, RevenueReport, RevenueRequest, RevenueSummary,
};
