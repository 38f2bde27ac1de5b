// In-memory Transaction Source
//
// Serves records the way the Stripe list endpoint does: filtered by the
// created bounds, `limit` at a time, continuing after `starting_after`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use revenue_report::core::{AppError, Result};
use revenue_report::stripe::{ListQuery, TransactionPage, TransactionRecord, TransactionSource};

pub struct InMemorySource {
    records: Vec<TransactionRecord>,
    requests: AtomicUsize,
    queries: Mutex<Vec<ListQuery>>,
    /// 1-based request number that fails with an upstream error
    fail_on_request: Option<usize>,
}

impl InMemorySource {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self {
            records,
            requests: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
            fail_on_request: None,
        }
    }

    pub fn failing_on(mut self, request: usize) -> Self {
        self.fail_on_request = Some(request);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<ListQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionSource for InMemorySource {
    async fn list_transactions(&self, query: &ListQuery) -> Result<TransactionPage> {
        let request = self.requests.fetch_add(1, Ordering::SeqCst) + 1;
        self.queries.lock().unwrap().push(query.clone());

        if self.fail_on_request == Some(request) {
            return Err(AppError::upstream("Stripe API error - HTTP 500: simulated outage"));
        }

        let in_range: Vec<&TransactionRecord> = self
            .records
            .iter()
            .filter(|r| query.created_gte <= r.created && r.created <= query.created_lte)
            .collect();

        let start = match &query.starting_after {
            None => 0,
            Some(cursor) => in_range
                .iter()
                .position(|r| &r.id == cursor)
                .map(|i| i + 1)
                .ok_or_else(|| AppError::upstream(format!("No such payment_intent: '{}'", cursor)))?,
        };

        let end = (start + query.limit as usize).min(in_range.len());

        Ok(TransactionPage {
            data: in_range[start..end].iter().map(|r| (*r).clone()).collect(),
            has_more: end < in_range.len(),
        })
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
