//! Nominatim geocoding client
//!
//! Resolves the best match for a free-form address. Nominatim's usage
//! policy caps clients at one request per second, so requests are spaced
//! out and successful lookups are cached.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::config::GeocodingConfig;
use crate::error::GeocodingError;

/// Minimum spacing between requests per the Nominatim usage policy
const REQUEST_SPACING: Duration = Duration::from_millis(1100);

/// A resolved place: coordinates plus the service's formatted name
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    /// Resolved coordinate
    pub location: GeoLocation,
    /// Formatted address reported by the service
    pub display_name: String,
}

/// Trait for forward geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve a free-form address to its best-matching place
    async fn geocode(&self, address: &str) -> Result<GeocodedPlace, GeocodingError>;
}

/// Nominatim-based geocoding client with rate limiting and caching
#[derive(Debug)]
pub struct NominatimClient {
    client: Client,
    config: GeocodingConfig,
    cache: Cache<String, GeocodedPlace>,
    last_request: Arc<Mutex<Instant>>,
}

impl NominatimClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Footpath/0.1")
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache_ttl = if config.caching_enabled() {
            Duration::from_secs(config.cache_ttl_hours * 3600)
        } else {
            Duration::from_secs(1) // Minimal TTL when "disabled"
        };

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Arc::new(Mutex::new(Instant::now() - 2 * REQUEST_SPACING)),
        })
    }

    /// Space requests out to at most one per second
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < REQUEST_SPACING {
            let wait = REQUEST_SPACING.saturating_sub(elapsed);
            debug!(?wait, "Rate limiting geocoding request");
            tokio::time::sleep(wait).await;
        }
        *last = Instant::now();
    }

    /// Convert a raw Nominatim result into a place
    fn convert_result(raw: &NominatimResult) -> Result<GeocodedPlace, GeocodingError> {
        let latitude: f64 = raw
            .lat
            .parse()
            .map_err(|_| GeocodingError::ParseError("Invalid latitude".to_string()))?;
        let longitude: f64 = raw
            .lon
            .parse()
            .map_err(|_| GeocodingError::ParseError("Invalid longitude".to_string()))?;

        let location = GeoLocation::new(latitude, longitude)
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Ok(GeocodedPlace {
            location,
            display_name: raw.display_name.clone().unwrap_or_default(),
        })
    }
}

#[async_trait]
impl GeocodingClient for NominatimClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeocodedPlace, GeocodingError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodingError::AddressNotFound(
                "Address must not be empty".to_string(),
            ));
        }

        let cache_key = address.to_lowercase();
        if let Some(place) = self.cache.get(&cache_key).await {
            debug!(%address, "Geocoding cache hit");
            return Ok(place);
        }

        self.rate_limit().await;

        let url = format!("{}/search", self.config.base_url);
        let params = [
            ("q", address.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", "1".to_string()),
            ("accept-language", self.config.accept_language.clone()),
        ];

        debug!(%address, "Geocoding address");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let raw = results
            .first()
            .ok_or_else(|| GeocodingError::AddressNotFound(address.to_string()))?;

        let place = Self::convert_result(raw)?;
        debug!(%address, location = %place.location, "Geocoded address");

        self.cache.insert(cache_key, place.clone()).await;
        Ok(place)
    }
}

/// Raw Nominatim API response entry
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_result() {
        let raw = NominatimResult {
            lat: "51.5034".to_string(),
            lon: "-0.1276".to_string(),
            display_name: Some("10 Downing Street, London".to_string()),
        };

        let place = NominatimClient::convert_result(&raw).expect("valid result");
        assert!((place.location.latitude() - 51.5034).abs() < f64::EPSILON);
        assert_eq!(place.display_name, "10 Downing Street, London");
    }

    #[test]
    fn test_convert_result_rejects_bad_numbers() {
        let raw = NominatimResult {
            lat: "not-a-number".to_string(),
            lon: "-0.1276".to_string(),
            display_name: None,
        };
        assert!(matches!(
            NominatimClient::convert_result(&raw),
            Err(GeocodingError::ParseError(_))
        ));
    }

    #[test]
    fn test_convert_result_rejects_out_of_range() {
        let raw = NominatimResult {
            lat: "123.0".to_string(),
            lon: "-0.1276".to_string(),
            display_name: None,
        };
        assert!(matches!(
            NominatimClient::convert_result(&raw),
            Err(GeocodingError::ParseError(_))
        ));
    }

    #[test]
    fn test_raw_result_parsing() {
        let json = r#"[{"lat": "51.5007", "lon": "-0.1246", "display_name": "Big Ben"}]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(json).expect("parse");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_name.as_deref(), Some("Big Ben"));
    }

    #[test]
    fn test_raw_result_parsing_empty() {
        let results: Vec<NominatimResult> =
            serde_json::from_str("[]").expect("parse empty");
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_empty_address_rejected_without_request() {
        let client = NominatimClient::new(&GeocodingConfig::for_testing()).expect("client");
        let result = client.geocode("   ").await;
        assert!(matches!(result, Err(GeocodingError::AddressNotFound(_))));
    }
}
