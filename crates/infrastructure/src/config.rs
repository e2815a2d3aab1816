//! Application configuration

use domain::value_objects::{GeoLocation, InvalidCoordinates};
use integration_directions::DirectionsConfig;
use integration_geocoding::GeocodingConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Geocoding service configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Directions service configuration
    #[serde(default)]
    pub directions: DirectionsConfig,

    /// Camera fallback position used before the first device fix arrives
    #[serde(default)]
    pub default_location: Option<DefaultLocationConfig>,
}

/// A configured fallback position
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DefaultLocationConfig {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl DefaultLocationConfig {
    /// Convert to a validated location
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` when out of range.
    pub fn to_location(self) -> Result<GeoLocation, InvalidCoordinates> {
        GeoLocation::new(self.latitude, self.longitude)
    }
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("footpath").required(false))
            // Override with environment variables (e.g., FOOTPATH_GEOCODING_TIMEOUT_SECS)
            .add_source(
                config::Environment::with_prefix("FOOTPATH")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first section error, prefixed with the section name.
    pub fn validate(&self) -> Result<(), String> {
        self.geocoding
            .validate()
            .map_err(|e| format!("geocoding: {e}"))?;
        self.directions
            .validate()
            .map_err(|e| format!("directions: {e}"))?;
        if let Some(location) = self.default_location {
            location
                .to_location()
                .map_err(|e| format!("default_location: {e}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_service_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.geocoding.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.directions.profile, "walking");
        assert!(config.default_location.is_none());
    }

    #[test]
    fn validate_requires_directions_token() {
        let config = AppConfig::default();
        let error = config.validate().expect_err("token missing");
        assert!(error.starts_with("directions:"));
    }

    #[test]
    fn validate_accepts_complete_config() {
        let config = AppConfig {
            directions: DirectionsConfig::from_token("pk.test"),
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_default_location() {
        let config = AppConfig {
            directions: DirectionsConfig::from_token("pk.test"),
            default_location: Some(DefaultLocationConfig {
                latitude: 123.0,
                longitude: 0.0,
            }),
            ..AppConfig::default()
        };
        let error = config.validate().expect_err("latitude out of range");
        assert!(error.starts_with("default_location:"));
    }

    #[test]
    fn deserializes_from_partial_file() {
        let toml = r#"
            [geocoding]
            accept_language = "en-GB"

            [directions]
            access_token = "pk.from-file"

            [default_location]
            latitude = 51.5074
            longitude = -0.1278
        "#;

        let config: AppConfig = toml::from_str(toml).expect("parse");
        assert_eq!(config.geocoding.accept_language, "en-GB");
        assert_eq!(config.directions.access_token_str(), Some("pk.from-file"));
        let location = config
            .default_location
            .expect("location present")
            .to_location()
            .expect("valid location");
        assert_eq!(location, GeoLocation::london());
    }
}
