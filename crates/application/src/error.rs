//! Application-level errors

use thiserror::Error;

use crate::ports::SurfaceError;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// External service error (geocoding or directions)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// The map surface rejected a drawing operation
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// Operation not valid in the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_service_message_is_preserved() {
        let err = ApplicationError::ExternalService("geocoding down".to_string());
        assert_eq!(err.to_string(), "External service error: geocoding down");
    }

    #[test]
    fn surface_error_is_transparent() {
        let err = ApplicationError::from(SurfaceError::Rejected("bad geometry".to_string()));
        assert_eq!(err.to_string(), "Surface rejected operation: bad geometry");
    }
}
