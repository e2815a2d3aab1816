//! Directions service configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the Mapbox Directions service
#[derive(Clone, Serialize, Deserialize)]
pub struct DirectionsConfig {
    /// Base URL for the Mapbox API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Routing profile appended to the request path
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Mapbox access token (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub access_token: Option<SecretString>,
}

impl std::fmt::Debug for DirectionsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectionsConfig")
            .field("base_url", &self.base_url)
            .field("profile", &self.profile)
            .field("timeout_secs", &self.timeout_secs)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.mapbox.com".to_string()
}

fn default_profile() -> String {
    "walking".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            profile: default_profile(),
            timeout_secs: default_timeout_secs(),
            access_token: None,
        }
    }
}

impl DirectionsConfig {
    /// Create a configuration with an access token and defaults otherwise
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(SecretString::from(token.into())),
            ..Default::default()
        }
    }

    /// Get the access token as a string reference (for API calls)
    #[must_use]
    pub fn access_token_str(&self) -> Option<&str> {
        self.access_token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }
        if self.profile.is_empty() {
            return Err("profile must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.access_token_str().is_none_or(str::is_empty) {
            return Err("access_token must be set".to_string());
        }
        Ok(())
    }
}
