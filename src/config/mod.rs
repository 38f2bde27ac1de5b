use crate::core::{AppError, Result};
use crate::modules::revenue::FeeSchedule;
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

pub mod server;
pub mod stripe;

pub use server::ServerConfig;
pub use stripe::StripeConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub stripe: StripeConfig,
    pub revenue: RevenueConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Configuration(format!("Invalid LOG_FORMAT: {}", other))),
        }
    }
}

/// Business rules of the revenue calculation
#[derive(Debug, Clone)]
pub struct RevenueConfig {
    /// Fixed business timezone, minutes east of UTC (Bolivia is -240)
    pub utc_offset_minutes: i32,
    /// Processor percentage fee as a fraction
    pub fee_percentage: Decimal,
    /// Processor fixed fee per transaction, primary currency
    pub fee_fixed: Decimal,
    /// Secondary currency units per one primary unit
    pub exchange_rate: Decimal,
}

impl RevenueConfig {
    pub fn from_env() -> Result<Self> {
        Ok(RevenueConfig {
            utc_offset_minutes: env::var("BUSINESS_UTC_OFFSET_MINUTES")
                .unwrap_or_else(|_| "-240".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid BUSINESS_UTC_OFFSET_MINUTES".to_string())
                })?,
            fee_percentage: decimal_var("FEE_PERCENTAGE", "0.029")?,
            fee_fixed: decimal_var("FEE_FIXED", "0.30")?,
            exchange_rate: decimal_var("EXCHANGE_RATE", "6.96")?,
        })
    }

    pub fn fee_schedule(&self) -> FeeSchedule {
        FeeSchedule::new(self.fee_percentage, self.fee_fixed)
    }

    pub fn validate(&self) -> Result<()> {
        if self.utc_offset_minutes.unsigned_abs() > 18 * 60 {
            return Err(AppError::Configuration(
                "UTC offset must be within +/-18 hours".to_string(),
            ));
        }

        if self.fee_percentage < Decimal::ZERO || self.fee_percentage >= Decimal::ONE {
            return Err(AppError::Configuration(
                "Fee percentage must be in [0, 1)".to_string(),
            ));
        }

        if self.fee_fixed < Decimal::ZERO {
            return Err(AppError::Configuration(
                "Fixed fee cannot be negative".to_string(),
            ));
        }

        if self.exchange_rate <= Decimal::ZERO {
            return Err(AppError::Configuration(
                "Exchange rate must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn decimal_var(name: &str, default: &str) -> Result<Decimal> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    Decimal::from_str(raw.trim())
        .map_err(|_| AppError::Configuration(format!("Invalid {}: {}", name, raw)))
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT")
                    .unwrap_or_else(|_| "pretty".to_string())
                    .parse()?,
            },
            server: ServerConfig::from_env()?,
            stripe: StripeConfig::from_env()?,
            revenue: RevenueConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.stripe.secret_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "STRIPE_SECRET_KEY cannot be empty".to_string(),
            ));
        }

        if self.stripe.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Stripe timeout must be greater than 0".to_string(),
            ));
        }

        self.revenue.validate()
    }
}
