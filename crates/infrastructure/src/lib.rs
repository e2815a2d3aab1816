//! Infrastructure layer - Adapters and configuration
//!
//! Implements the application ports on top of the integration crates and
//! provides the composition-root configuration loading.

pub mod adapters;
pub mod config;

pub use adapters::{
    ChannelPositionSource, DirectionsAdapter, FixedPositionSource, GeocodingAdapter,
    HeadlessMapSurface,
};
pub use config::AppConfig;
