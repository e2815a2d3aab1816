//! Directions error types

use thiserror::Error;

/// Errors that can occur when fetching a route
#[derive(Debug, Error)]
pub enum DirectionsError {
    /// Transport-level failure reaching the directions service
    #[error("Network error: {0}")]
    Network(String),

    /// The directions service answered with a failure status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The response body does not match the expected schema
    #[error("Decode error: {0}")]
    Decode(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the API)
        retry_after_secs: Option<u64>,
    },

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DirectionsError {
    /// Returns true if the same request might succeed later
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_)
                | Self::RequestFailed(_)
                | Self::RateLimitExceeded { .. }
                | Self::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(DirectionsError::Network("reset".to_string()).is_retryable());
        assert!(DirectionsError::RequestFailed("HTTP 502".to_string()).is_retryable());
        assert!(
            DirectionsError::RateLimitExceeded {
                retry_after_secs: Some(30)
            }
            .is_retryable()
        );
        assert!(DirectionsError::Timeout { timeout_secs: 10 }.is_retryable());
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!DirectionsError::Decode("missing field".to_string()).is_retryable());
        assert!(!DirectionsError::Configuration("no token".to_string()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = DirectionsError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));

        let err = DirectionsError::RateLimitExceeded {
            retry_after_secs: Some(30),
        };
        assert!(err.to_string().contains("30"));
    }
}
