//! Forward geocoding port
//!
//! Turns a free-text address into a geographic coordinate. Both route
//! endpoints go through this port before any directions call is made.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A geocoded address: coordinates plus the service's formatted name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    /// Resolved coordinate
    pub location: GeoLocation,
    /// Formatted address as reported by the geocoding service
    pub formatted: String,
}

/// Port for forward geocoding
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a free-text address to a coordinate
    ///
    /// Fails when the service errors or returns zero results.
    async fn resolve(&self, address: &str) -> Result<ResolvedAddress, ApplicationError>;
}
