use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Deserialize;

use super::source::{ListQuery, TransactionSource};
use crate::config::StripeConfig;
use crate::core::{AppError, Result};
use crate::modules::stripe::models::TransactionPage;

/// Stripe PaymentIntents client
///
/// Reads from the list endpoint only.
/// API Documentation: https://docs.stripe.com/api/payment_intents/list
pub struct StripeClient {
    client: ClientWithMiddleware,
    secret_key: String,
    base_url: String,
}

/// Error envelope returned by Stripe on non-2xx responses
#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl StripeClient {
    /// Create a new Stripe client
    ///
    /// Transient failures are retried with exponential backoff up to
    /// `config.max_retries` times; the default of zero disables retries.
    pub fn new(config: &StripeConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            secret_key: config.secret_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn query_params(query: &ListQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", query.limit.to_string()),
            ("created[gte]", query.created_gte.to_string()),
            ("created[lte]", query.created_lte.to_string()),
        ];
        if let Some(cursor) = &query.starting_after {
            params.push(("starting_after", cursor.clone()));
        }
        params
    }
}

/// Human-readable message from a Stripe error body, falling back to the raw body
fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<StripeErrorBody>(body) {
        Ok(StripeErrorBody {
            error: StripeErrorDetail { message: Some(message), kind },
        }) => match kind {
            Some(kind) => format!("{} ({})", message, kind),
            None => message,
        },
        _ => body.to_string(),
    }
}

fn describe_send_error(error: &reqwest_middleware::Error) -> String {
    match error {
        reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => {
            format!("Stripe unavailable: timeout ({})", e)
        }
        reqwest_middleware::Error::Reqwest(e) if e.is_connect() => {
            format!("Stripe unavailable: connection failed ({})", e)
        }
        other => format!("Stripe API request failed: {}", other),
    }
}

#[async_trait]
impl TransactionSource for StripeClient {
    async fn list_transactions(&self, query: &ListQuery) -> Result<TransactionPage> {
        let url = format!("{}/v1/payment_intents", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.secret_key)
            .header("Accept", "application/json")
            .query(&Self::query_params(query))
            .send()
            .await
            .map_err(|e| AppError::upstream(describe_send_error(&e)))?;

        let status_code = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|e| AppError::upstream(format!("Failed to read Stripe response: {}", e)))?;

        if !status_code.is_success() {
            return Err(AppError::upstream(format!(
                "Stripe API error - HTTP {}: {}",
                status_code.as_u16(),
                describe_error_body(&response_body)
            )));
        }

        serde_json::from_str(&response_body)
            .map_err(|e| AppError::upstream(format!("Failed to parse Stripe response: {}", e)))
    }

    fn name(&self) -> &str {
        "stripe"
    }
}
