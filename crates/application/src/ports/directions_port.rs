//! Directions port
//!
//! One walking-route request between two already-resolved coordinates.
//! A single invocation issues a single request; failures are terminal for
//! that invocation (no retry at this layer).

use async_trait::async_trait;
use domain::entities::RouteResponse;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the remote directions service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectionsPort: Send + Sync {
    /// Fetch a route from `from` to `to`
    ///
    /// The response may contain zero routes; that is a valid answer, not an
    /// error.
    async fn fetch_route(
        &self,
        from: GeoLocation,
        to: GeoLocation,
    ) -> Result<RouteResponse, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn DirectionsPort>();
    }
}
