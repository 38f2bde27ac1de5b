//! Revenue Report Service Library
//!
//! Aggregates succeeded Stripe payments over a local date range into gross,
//! fee and net totals, converted to the local currency.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

use actix_web::web;

// Re-export commonly used types
pub use modules::revenue;
pub use modules::stripe;

/// Register every HTTP route of the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    modules::health::configure(cfg);
    modules::revenue::configure(cfg);
}
