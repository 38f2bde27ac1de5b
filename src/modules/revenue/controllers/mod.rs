mod revenue_controller;

pub use revenue_controller::{get_revenue, post_revenue};

// Re-export configure for main.rs
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    revenue_controller::configure_routes(cfg);
}
