//! Adapters - Application ports implemented over the integration crates
//! and local stand-ins for platform services

mod directions_adapter;
mod geocoding_adapter;
mod headless_map_surface;
mod position_sources;

pub use directions_adapter::DirectionsAdapter;
pub use geocoding_adapter::GeocodingAdapter;
pub use headless_map_surface::HeadlessMapSurface;
pub use position_sources::{ChannelPositionSource, FixedPositionSource};
