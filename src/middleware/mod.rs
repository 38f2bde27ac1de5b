pub mod cors;
pub mod error_handler;

pub use cors::cors;
pub use error_handler::{json_config, json_error_handler, query_config, query_error_handler};
