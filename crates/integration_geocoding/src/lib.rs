//! Forward geocoding integration for Footpath
//!
//! Converts free-form address strings to geographic coordinates using the
//! [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap).
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern consistent with the other
//! integration crates. [`GeocodingClient`] defines the interface, implemented
//! by [`NominatimClient`], which adds rate limiting (max 1 request/second per
//! Nominatim usage policy) and result caching to minimize API calls.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geocoding::{GeocodingConfig, NominatimClient};
//!
//! let client = NominatimClient::new(&GeocodingConfig::default())?;
//! let place = client.geocode("10 Downing St, London").await?;
//! println!("{} -> {}", place.display_name, place.location);
//! ```

mod client;
mod config;
mod error;

pub use client::{GeocodedPlace, GeocodingClient, NominatimClient};
pub use config::GeocodingConfig;
pub use error::GeocodingError;
