//! Directions integration for Footpath
//!
//! Requests turn-by-turn walking routes from the
//! [Mapbox Directions API v5](https://docs.mapbox.com/api/navigation/directions/)
//! and parses the response into the domain route model.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern consistent with the other
//! integration crates. [`DirectionsClient`] defines the interface,
//! implemented by [`MapboxDirectionsClient`]. One invocation issues one
//! request; there is no retry and failures are terminal for that call.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::value_objects::GeoLocation;
//! use integration_directions::{DirectionsConfig, MapboxDirectionsClient};
//!
//! let config = DirectionsConfig::from_token("pk.example");
//! let client = MapboxDirectionsClient::new(&config)?;
//!
//! let response = client
//!     .fetch_route(GeoLocation::downing_street(), GeoLocation::big_ben())
//!     .await?;
//! ```

mod client;
mod config;
mod error;

pub use client::{DirectionsClient, MapboxDirectionsClient};
pub use config::DirectionsConfig;
pub use error::DirectionsError;
