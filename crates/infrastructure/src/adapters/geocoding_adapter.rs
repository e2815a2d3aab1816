//! Geocoding adapter - Implements GeocodingPort using integration_geocoding

use application::error::ApplicationError;
use application::ports::{GeocodingPort, ResolvedAddress};
use async_trait::async_trait;
use integration_geocoding::GeocodingClient;
use tracing::{instrument, warn};

/// Adapter exposing a geocoding client as the application port
#[derive(Debug)]
pub struct GeocodingAdapter<C: GeocodingClient> {
    client: C,
}

impl<C: GeocodingClient> GeocodingAdapter<C> {
    /// Wrap a geocoding client
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: GeocodingClient> GeocodingPort for GeocodingAdapter<C> {
    #[instrument(skip(self))]
    async fn resolve(&self, address: &str) -> Result<ResolvedAddress, ApplicationError> {
        let place = self.client.geocode(address).await.map_err(|e| {
            warn!(%address, %e, "Failed to geocode address");
            ApplicationError::ExternalService(format!("Failed to geocode '{address}': {e}"))
        })?;

        Ok(ResolvedAddress {
            location: place.location,
            formatted: place.display_name,
        })
    }
}
