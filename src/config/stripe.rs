use crate::core::{AppError, Result};
use std::env;

/// Stripe API access
#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub base_url: String,
    /// Per-request timeout; a hung page request fails instead of blocking
    pub timeout_secs: u64,
    /// Retries for transient failures, zero disables retrying
    pub max_retries: u32,
}

impl StripeConfig {
    pub fn from_env() -> Result<Self> {
        Ok(StripeConfig {
            secret_key: env::var("STRIPE_SECRET_KEY")
                .map_err(|_| AppError::Configuration("STRIPE_SECRET_KEY not set".to_string()))?,
            base_url: env::var("STRIPE_BASE_URL")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            timeout_secs: env::var("STRIPE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| AppError::Configuration("Invalid STRIPE_TIMEOUT_SECS".to_string()))?,
            max_retries: env::var("STRIPE_MAX_RETRIES")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .map_err(|_| AppError::Configuration("Invalid STRIPE_MAX_RETRIES".to_string()))?,
        })
    }
}
