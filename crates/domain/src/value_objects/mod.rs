//! Value objects - Immutable domain primitives

mod geo_location;

pub use geo_location::{GeoLocation, InvalidCoordinates};
