//! Geocoding error types

use thiserror::Error;

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to the geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the response from the geocoding service
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Address could not be resolved to coordinates
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Rate limit exceeded (max 1 req/sec for Nominatim)
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

impl GeocodingError {
    /// Returns true if the same request might succeed later
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::RateLimitExceeded
                | Self::Timeout
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(GeocodingError::ConnectionFailed("reset".to_string()).is_retryable());
        assert!(GeocodingError::RateLimitExceeded.is_retryable());
        assert!(GeocodingError::Timeout.is_retryable());
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!GeocodingError::AddressNotFound("Atlantis".to_string()).is_retryable());
        assert!(!GeocodingError::ParseError("not json".to_string()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = GeocodingError::AddressNotFound("10 Downing St".to_string());
        assert!(err.to_string().contains("10 Downing St"));

        let err = GeocodingError::Timeout;
        assert!(err.to_string().contains("timed out"));
    }
}
