// Test Data Factory
//
// Builds transaction records and Stripe-shaped JSON pages.

use revenue_report::stripe::{TransactionRecord, TransactionStatus};
use serde_json::{json, Value};

/// 2024-01-01T00:00:00-04:00
pub const JAN_1_START: i64 = 1_704_081_600;

/// 2024-01-31T23:59:59-04:00
pub const JAN_31_END: i64 = 1_706_759_999;

pub struct TestDataFactory;

impl TestDataFactory {
    /// Succeeded payment created `offset` seconds after the start of 2024-01-01 (UTC-4)
    pub fn succeeded(id: &str, amount: i64, offset: i64) -> TransactionRecord {
        TransactionRecord::new(id, TransactionStatus::Succeeded, amount, JAN_1_START + offset)
    }

    pub fn with_status(id: &str, status: TransactionStatus, amount: i64) -> TransactionRecord {
        TransactionRecord::new(id, status, amount, JAN_1_START + 3_600)
    }

    /// `count` succeeded payments spread over January, newest first like Stripe
    pub fn january_payments(count: usize, amount: i64) -> Vec<TransactionRecord> {
        (0..count)
            .rev()
            .map(|i| Self::succeeded(&format!("pi_{:05}", i), amount, i as i64 * 60))
            .collect()
    }

    /// Stripe `list` object for a slice of records
    pub fn stripe_page(records: &[TransactionRecord], has_more: bool) -> Value {
        json!({
            "object": "list",
            "url": "/v1/payment_intents",
            "has_more": has_more,
            "data": records
                .iter()
                .map(|r| json!({
                    "id": r.id,
                    "object": "payment_intent",
                    "amount": r.amount,
                    "amount_received": r.amount,
                    "currency": r.currency,
                    "created": r.created,
                    "status": r.status,
                    "livemode": false
                }))
                .collect::<Vec<_>>()
        })
    }
}
