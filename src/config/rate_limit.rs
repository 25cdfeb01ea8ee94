//! Rate limiting configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::rate_limiter::RateLimitConfig;

/// Rate limiting configuration for the answer-submission path.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    /// Submissions allowed per origin per window
    #[serde(default = "default_requests_per_window")]
    pub requests_per_window: u32,

    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u32,
}

impl RateLimitSettings {
    /// Converts to the adapter's config type.
    pub fn to_config(&self) -> RateLimitConfig {
        RateLimitConfig {
            requests_per_window: self.requests_per_window,
            window_secs: self.window_secs,
        }
    }

    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_secs == 0 || self.window_secs > 3600 {
            return Err(ValidationError::InvalidRateLimitWindow);
        }
        Ok(())
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            requests_per_window: default_requests_per_window(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_requests_per_window() -> u32 {
    30
}

fn default_window_secs() -> u32 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = RateLimitSettings::default();
        assert_eq!(settings.requests_per_window, 30);
        assert_eq!(settings.window_secs, 60);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_window() {
        let settings = RateLimitSettings {
            window_secs: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
