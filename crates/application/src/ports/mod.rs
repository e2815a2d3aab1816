//! Ports - Interfaces to external collaborators
//!
//! Adapters in the infrastructure layer implement these ports using the
//! integration crates or platform services.

mod directions_port;
mod geocoding_port;
mod map_surface_port;
mod position_port;

pub use directions_port::DirectionsPort;
pub use geocoding_port::{GeocodingPort, ResolvedAddress};
pub use map_surface_port::{
    CameraRequest, CameraTarget, LineColor, MapSurfacePort, MarkerSpec, PolylineStyle,
    SurfaceError,
};
pub use position_port::{PositionFix, PositionStreamPort};

#[cfg(test)]
pub use directions_port::MockDirectionsPort;
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
#[cfg(test)]
pub use map_surface_port::MockMapSurfacePort;
#[cfg(test)]
pub use position_port::MockPositionStreamPort;
