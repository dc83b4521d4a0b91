//! In-memory `DataSource` for tests.
//!
//! Responses are registered per URL up front. Unknown URLs answer with a 404,
//! URLs registered through `with_failure` answer with a 500. The fake also
//! records how many requests were made and the highest number that were in
//! flight at once, so fan-out limits can be asserted on.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::{ClientError, DataSource};

/// Base URL the fake answers under
pub const FAKE_BASE_URL: &str = "http://fake.local/api";

#[derive(Default)]
pub struct FakeSource {
    base_url: String,
    responses: HashMap<String, serde_json::Value>,
    failures: HashSet<String>,
    delay: Duration,
    calls: AtomicU64,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            base_url: FAKE_BASE_URL.to_string(),
            ..Self::default()
        }
    }

    /// Answer GET `url` with `body`
    pub fn with_response(mut self, url: impl Into<String>, body: serde_json::Value) -> Self {
        self.responses.insert(url.into(), body);
        self
    }

    /// Answer GET `url` with a server error
    pub fn with_failure(mut self, url: impl Into<String>) -> Self {
        self.failures.insert(url.into());
        self
    }

    /// Sleep this long before answering each request
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Total requests served so far
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Highest number of requests that were being served at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DataSource for FakeSource {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, url: &str) -> Result<serde_json::Value, ClientError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = if self.failures.contains(url) {
            Err(ClientError::Status {
                url: url.to_string(),
                status: 500,
            })
        } else {
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| ClientError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_registered_response() {
        let source = FakeSource::new().with_response("http://fake/a", json!({"name": "a"}));
        let body = source.get_json("http://fake/a").await.unwrap();
        assert_eq!(body["name"], "a");
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_wins_over_response() {
        let source = FakeSource::new()
            .with_response("http://fake/a", json!({}))
            .with_failure("http://fake/a");

        let err = source.get_json("http://fake/a").await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 500, .. }));
    }
}
