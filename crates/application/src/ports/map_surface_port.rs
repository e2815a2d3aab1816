//! Map surface port
//!
//! Narrow interface over the interactive map engine: source/layer
//! registration by string id, polyline geometry, labeled point markers, and
//! camera animation. The engine itself (tile loading, projection, GPU
//! drawing) stays behind this boundary.
//!
//! Calls are synchronous; implementations forward them to the engine's own
//! render scheduling.

use std::time::Duration;

use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// An RGB polyline color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColor {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl LineColor {
    /// Blue
    pub const BLUE: Self = Self { r: 0, g: 122, b: 255 };
    /// Green
    pub const GREEN: Self = Self { r: 52, g: 199, b: 89 };
    /// Red
    pub const RED: Self = Self { r: 255, g: 59, b: 48 };
    /// Yellow
    pub const YELLOW: Self = Self { r: 255, g: 204, b: 0 };
    /// Purple
    pub const PURPLE: Self = Self { r: 175, g: 82, b: 222 };
}

/// Stroke styling for a route polyline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylineStyle {
    /// Stroke color
    pub color: LineColor,
    /// Stroke width in points
    pub width: f64,
}

/// A labeled maneuver pin
///
/// Rendered with the icon anchored at its bottom edge and the label text
/// anchored below the icon.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    /// Pin position
    pub location: GeoLocation,
    /// Label text shown with the pin
    pub label: String,
}

/// Where the camera should move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraTarget {
    /// Center on a point at a fixed zoom level
    Center {
        /// Point to center on
        center: GeoLocation,
        /// Zoom level
        zoom: f64,
    },
    /// Fit the viewport to a two-point bounding box
    Bounds {
        /// One corner anchor
        first: GeoLocation,
        /// The opposite corner anchor
        second: GeoLocation,
    },
}

/// A camera animation request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRequest {
    /// Where to move
    pub target: CameraTarget,
    /// Animation duration
    pub duration: Duration,
}

/// Errors reported by a map surface implementation
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The referenced id is not registered
    ///
    /// Non-fatal when clearing stale layers; there is simply nothing to
    /// remove.
    #[error("No such layer or source: {0}")]
    NotFound(String),

    /// The id is already registered
    #[error("Duplicate layer or source id: {0}")]
    Duplicate(String),

    /// The engine rejected the operation
    #[error("Surface rejected operation: {0}")]
    Rejected(String),
}

/// Port for the interactive map drawing surface
#[cfg_attr(test, automock)]
pub trait MapSurfacePort: Send + Sync {
    /// Register a polyline under a source id and a layer id
    fn add_polyline(
        &self,
        source_id: &str,
        layer_id: &str,
        coordinates: &[GeoLocation],
        style: PolylineStyle,
    ) -> Result<(), SurfaceError>;

    /// Remove a layer by id
    fn remove_layer(&self, layer_id: &str) -> Result<(), SurfaceError>;

    /// Remove a source by id
    fn remove_source(&self, source_id: &str) -> Result<(), SurfaceError>;

    /// Ids of all currently registered layers
    fn layer_ids(&self) -> Vec<String>;

    /// Ids of all currently registered sources
    fn source_ids(&self) -> Vec<String>;

    /// Replace the markers of a named marker group
    fn set_markers(&self, group_id: &str, markers: &[MarkerSpec]) -> Result<(), SurfaceError>;

    /// Animate the camera
    fn ease_camera(&self, request: CameraRequest) -> Result<(), SurfaceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn MapSurfacePort>();
    }

    #[test]
    fn surface_error_display() {
        let err = SurfaceError::NotFound("step-layer-3".to_string());
        assert!(err.to_string().contains("step-layer-3"));

        let err = SurfaceError::Duplicate("step-source-0".to_string());
        assert!(err.to_string().contains("step-source-0"));
    }

    #[test]
    fn palette_colors_are_distinct() {
        let colors = [
            LineColor::BLUE,
            LineColor::GREEN,
            LineColor::RED,
            LineColor::YELLOW,
            LineColor::PURPLE,
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
