//! In-memory rate limiter.
//!
//! Fixed-window counter over a HashMap. Suitable for testing and
//! single-server deployments; multi-server deployments would need a
//! shared backend behind the same port.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};

/// Rate limiter configuration.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Requests allowed per window.
    pub requests_per_window: u32,
    /// Window length in seconds.
    pub window_secs: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 30,
            window_secs: 60,
        }
    }
}

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    window_start: u64,
}

/// In-memory fixed-window rate limiter.
#[derive(Debug)]
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    windows: Arc<RwLock<HashMap<String, WindowState>>>,
}

impl InMemoryRateLimiter {
    /// Creates a limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a limiter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RateLimitConfig::default())
    }

    fn now_secs() -> u64 {
        Timestamp::now().as_unix_secs()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        let storage_key = key.storage_key();
        let now = Self::now_secs();
        let mut windows = self.windows.write().await;

        let state = windows.entry(storage_key).or_insert(WindowState {
            count: 0,
            window_start: now,
        });

        let window_end = state.window_start + self.config.window_secs as u64;
        if now >= window_end {
            state.count = 0;
            state.window_start = now;
        }

        if state.count >= self.config.requests_per_window {
            let retry_after =
                (state.window_start + self.config.window_secs as u64).saturating_sub(now) as u32;
            return Ok(RateLimitResult::Denied(RateLimitDenied {
                limit: self.config.requests_per_window,
                retry_after_secs: retry_after.max(1),
            }));
        }

        state.count += 1;
        Ok(RateLimitResult::Allowed(RateLimitStatus {
            limit: self.config.requests_per_window,
            remaining: self.config.requests_per_window - state.count,
            reset_at: Timestamp::from_unix_secs(
                state.window_start + self.config.window_secs as u64,
            ),
        }))
    }

    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError> {
        self.windows.write().await.remove(&key.storage_key());
        Ok(())
    }
}
