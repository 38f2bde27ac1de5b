use serde::{Deserialize, Serialize};

/// PaymentIntent lifecycle status as reported by Stripe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
    /// Any status this service does not know about
    #[serde(other)]
    Unknown,
}

impl TransactionStatus {
    /// Only settled payments carry revenue
    pub fn is_revenue_bearing(&self) -> bool {
        matches!(self, TransactionStatus::Succeeded)
    }
}

/// A single PaymentIntent, reduced to the fields revenue needs.
/// Owned by Stripe; never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Opaque id, doubles as the pagination cursor
    pub id: String,
    pub status: TransactionStatus,
    /// Amount in minor units (cents)
    pub amount: i64,
    /// Creation instant, epoch seconds
    pub created: i64,
    /// Lowercase ISO currency code, e.g. "usd"
    #[serde(default)]
    pub currency: String,
}

impl TransactionRecord {
    pub fn new(id: impl Into<String>, status: TransactionStatus, amount: i64, created: i64) -> Self {
        Self {
            id: id.into(),
            status,
            amount,
            created,
            currency: "usd".to_string(),
        }
    }
}

/// One page of the Stripe list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPage {
    pub data: Vec<TransactionRecord>,
    pub has_more: bool,
}

impl TransactionPage {
    /// Cursor for the following request: the id of the last record
    pub fn next_cursor(&self) -> Option<&str> {
        self.data.last().map(|record| record.id.as_str())
    }
}
