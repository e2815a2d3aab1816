//! Directions adapter - Implements DirectionsPort using integration_directions

use application::error::ApplicationError;
use application::ports::DirectionsPort;
use async_trait::async_trait;
use domain::entities::RouteResponse;
use domain::value_objects::GeoLocation;
use integration_directions::DirectionsClient;
use tracing::{instrument, warn};

/// Adapter exposing a directions client as the application port
#[derive(Debug)]
pub struct DirectionsAdapter<C: DirectionsClient> {
    client: C,
}

impl<C: DirectionsClient> DirectionsAdapter<C> {
    /// Wrap a directions client
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: DirectionsClient> DirectionsPort for DirectionsAdapter<C> {
    #[instrument(skip(self), fields(from = %from, to = %to))]
    async fn fetch_route(
        &self,
        from: GeoLocation,
        to: GeoLocation,
    ) -> Result<RouteResponse, ApplicationError> {
        self.client.fetch_route(from, to).await.map_err(|e| {
            warn!(%e, "Directions request failed");
            ApplicationError::ExternalService(format!("Failed to fetch route: {e}"))
        })
    }
}
