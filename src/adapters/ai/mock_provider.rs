//! Mock reasoning service for testing.
//!
//! Configurable to return scripted responses, simulate latency, or inject
//! errors, with call tracking for verification.
//!
//! # Example
//!
//! ```ignore
//! let service = MockReasoningService::new()
//!     .with_response(r#"{"overall": 8}"#)
//!     .with_error(ReasoningError::timeout(30));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{ReasoningError, ReasoningRequest, ReasoningService};

/// A scripted mock response.
#[derive(Debug, Clone)]
enum MockResponse {
    Success(String),
    Error(ReasoningError),
}

/// Mock reasoning service.
///
/// Responses are consumed in order; once the queue is empty a placeholder
/// response is returned.
#[derive(Debug, Clone, Default)]
pub struct MockReasoningService {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<ReasoningRequest>>>,
    delay: Duration,
}

impl MockReasoningService {
    /// Creates a mock with an empty response queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful raw-text response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(content.into()));
        self
    }

    /// Queues an error response.
    pub fn with_error(self, error: ReasoningError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of calls made to this service.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded requests, in call order.
    pub fn recorded_calls(&self) -> Vec<ReasoningRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success("Mock response".to_string()))
    }
}

#[async_trait]
impl ReasoningService for MockReasoningService {
    async fn complete(&self, request: ReasoningRequest) -> Result<String, ReasoningError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success(content) => Ok(content),
            MockResponse::Error(error) => Err(error),
        }
    }
}
