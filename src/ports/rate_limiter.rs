//! Rate limiting port.
//!
//! Coarse per-caller abuse guard, applied on the answer-submission path
//! only. Caller identity is best-effort (network origin); the state
//! machine's own idempotency checks are the real defense against
//! duplicate side effects.

use async_trait::async_trait;

use crate::domain::foundation::Timestamp;

/// Port for rate limiting operations.
///
/// Implementations should be thread-safe and support concurrent access.
/// A fixed-window counter is sufficient at this granularity.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Checks if a request is allowed, consuming a slot if so.
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError>;

    /// Clears the current window for a key, restoring full quota.
    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError>;
}

/// Key identifying what to rate limit.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RateLimitKey {
    /// Caller identity, e.g. a network origin.
    pub origin: String,
    /// Resource for finer-grained limits (e.g. "answers").
    pub resource: Option<String>,
}

impl RateLimitKey {
    /// Creates an origin-scoped key.
    pub fn origin(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            resource: None,
        }
    }

    /// Creates an origin-scoped key for a specific resource.
    pub fn origin_resource(origin: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            resource: Some(resource.into()),
        }
    }

    /// Returns the backing-store key string.
    pub fn storage_key(&self) -> String {
        match &self.resource {
            Some(resource) => format!("ratelimit:{}:{}", self.origin, resource),
            None => format!("ratelimit:{}", self.origin),
        }
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub enum RateLimitResult {
    /// Request is allowed; includes current status.
    Allowed(RateLimitStatus),
    /// Request is denied; includes denial details.
    Denied(RateLimitDenied),
}

impl RateLimitResult {
    /// Returns true if the request was allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed(_))
    }

    /// Returns true if the request was denied.
    pub fn is_denied(&self) -> bool {
        matches!(self, RateLimitResult::Denied(_))
    }
}

/// Current rate limit status.
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Remaining requests in the current window.
    pub remaining: u32,
    /// When the current window resets.
    pub reset_at: Timestamp,
}

/// Details of a rate limit denial.
#[derive(Debug, Clone)]
pub struct RateLimitDenied {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Seconds until the client should retry.
    pub retry_after_secs: u32,
}

/// Errors that can occur during rate limiting operations.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// Rate limiter backend is unavailable.
    #[error("rate limiter unavailable: {0}")]
    Unavailable(String),
}
