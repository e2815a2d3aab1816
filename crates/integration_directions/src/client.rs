//! Mapbox Directions v5 client
//!
//! Builds one request per invocation with the coordinates embedded in the
//! path (longitude,latitude order) and fixed query parameters selecting the
//! routing profile, GeoJSON geometry encoding, and step-by-step maneuvers.

use std::time::Duration;

use async_trait::async_trait;
use domain::entities::{Route, RouteResponse};
use domain::value_objects::GeoLocation;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::DirectionsConfig;
use crate::error::DirectionsError;

/// Trait for directions clients
#[async_trait]
pub trait DirectionsClient: Send + Sync {
    /// Fetch a route between two coordinates
    ///
    /// A response without routes is a valid answer, not an error.
    async fn fetch_route(
        &self,
        from: GeoLocation,
        to: GeoLocation,
    ) -> Result<RouteResponse, DirectionsError>;
}

/// Mapbox-based directions client
#[derive(Debug)]
pub struct MapboxDirectionsClient {
    client: Client,
    config: DirectionsConfig,
}

impl MapboxDirectionsClient {
    /// Create a new Mapbox directions client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &DirectionsConfig) -> Result<Self, DirectionsError> {
        config.validate().map_err(DirectionsError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Footpath/0.1")
            .build()
            .map_err(|e| DirectionsError::Network(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Build the request path with both coordinates in lon,lat order
    fn route_url(&self, from: GeoLocation, to: GeoLocation) -> String {
        format!(
            "{}/directions/v5/mapbox/{}/{},{};{},{}",
            self.config.base_url,
            self.config.profile,
            from.longitude(),
            from.latitude(),
            to.longitude(),
            to.latitude(),
        )
    }

    /// Parse the raw JSON body into the domain route model
    fn parse_response(body: &str) -> Result<RouteResponse, DirectionsError> {
        let raw: RawDirectionsResponse =
            serde_json::from_str(body).map_err(|e| DirectionsError::Decode(e.to_string()))?;

        if let Some(code) = raw.code.as_deref() {
            if code != "Ok" {
                warn!(code, message = ?raw.message, "Directions service reported a non-Ok code");
            }
        }

        Ok(RouteResponse { routes: raw.routes })
    }
}

#[async_trait]
impl DirectionsClient for MapboxDirectionsClient {
    #[instrument(skip(self), fields(from = %from, to = %to))]
    async fn fetch_route(
        &self,
        from: GeoLocation,
        to: GeoLocation,
    ) -> Result<RouteResponse, DirectionsError> {
        let url = self.route_url(from, to);
        let params = [
            ("geometries", "geojson"),
            ("steps", "true"),
            ("access_token", self.config.access_token_str().unwrap_or_default()),
        ];

        debug!(profile = %self.config.profile, "Requesting route");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DirectionsError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    DirectionsError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DirectionsError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(DirectionsError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DirectionsError::Decode(e.to_string()))?;

        let result = Self::parse_response(&body)?;

        debug!(routes = result.routes.len(), "Route response parsed");
        Ok(result)
    }
}

// --- Raw API envelope for deserialization ---

#[derive(Debug, Deserialize)]
struct RawDirectionsResponse {
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<Route>,
}
