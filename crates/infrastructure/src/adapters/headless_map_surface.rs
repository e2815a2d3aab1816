//! Headless map surface - In-memory MapSurfacePort implementation
//!
//! Stands in for the GPU map engine when there is none: keeps the
//! registered sources, layers, markers, and camera state in memory and
//! reports every operation through tracing. Lets the full pipeline run in
//! the CLI and in embedder tests.

use std::collections::BTreeMap;

use application::ports::{
    CameraRequest, MapSurfacePort, MarkerSpec, PolylineStyle, SurfaceError,
};
use domain::value_objects::GeoLocation;
use parking_lot::Mutex;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct SurfaceState {
    sources: BTreeMap<String, Vec<GeoLocation>>,
    layers: BTreeMap<String, PolylineStyle>,
    marker_groups: BTreeMap<String, Vec<MarkerSpec>>,
    camera: Option<CameraRequest>,
}

/// In-memory map surface
#[derive(Debug, Default)]
pub struct HeadlessMapSurface {
    state: Mutex<SurfaceState>,
}

impl HeadlessMapSurface {
    /// Create an empty surface
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The markers of a group, in insertion order
    #[must_use]
    pub fn markers(&self, group_id: &str) -> Vec<MarkerSpec> {
        self.state
            .lock()
            .marker_groups
            .get(group_id)
            .cloned()
            .unwrap_or_default()
    }

    /// The most recent camera request, if any
    #[must_use]
    pub fn camera(&self) -> Option<CameraRequest> {
        self.state.lock().camera
    }

    /// The registered polyline of a source
    #[must_use]
    pub fn polyline(&self, source_id: &str) -> Option<Vec<GeoLocation>> {
        self.state.lock().sources.get(source_id).cloned()
    }
}

impl MapSurfacePort for HeadlessMapSurface {
    fn add_polyline(
        &self,
        source_id: &str,
        layer_id: &str,
        coordinates: &[GeoLocation],
        style: PolylineStyle,
    ) -> Result<(), SurfaceError> {
        let mut state = self.state.lock();
        if state.sources.contains_key(source_id) {
            return Err(SurfaceError::Duplicate(source_id.to_string()));
        }
        if state.layers.contains_key(layer_id) {
            return Err(SurfaceError::Duplicate(layer_id.to_string()));
        }

        info!(source_id, layer_id, points = coordinates.len(), "Polyline added");
        state.sources.insert(source_id.to_string(), coordinates.to_vec());
        state.layers.insert(layer_id.to_string(), style);
        Ok(())
    }

    fn remove_layer(&self, layer_id: &str) -> Result<(), SurfaceError> {
        debug!(layer_id, "Removing layer");
        self.state
            .lock()
            .layers
            .remove(layer_id)
            .map(|_| ())
            .ok_or_else(|| SurfaceError::NotFound(layer_id.to_string()))
    }

    fn remove_source(&self, source_id: &str) -> Result<(), SurfaceError> {
        debug!(source_id, "Removing source");
        self.state
            .lock()
            .sources
            .remove(source_id)
            .map(|_| ())
            .ok_or_else(|| SurfaceError::NotFound(source_id.to_string()))
    }

    fn layer_ids(&self) -> Vec<String> {
        self.state.lock().layers.keys().cloned().collect()
    }

    fn source_ids(&self) -> Vec<String> {
        self.state.lock().sources.keys().cloned().collect()
    }

    fn set_markers(&self, group_id: &str, markers: &[MarkerSpec]) -> Result<(), SurfaceError> {
        info!(group_id, count = markers.len(), "Markers replaced");
        self.state
            .lock()
            .marker_groups
            .insert(group_id.to_string(), markers.to_vec());
        Ok(())
    }

    fn ease_camera(&self, request: CameraRequest) -> Result<(), SurfaceError> {
        info!(target = ?request.target, "Camera eased");
        self.state.lock().camera = Some(request);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use application::ports::{CameraTarget, LineColor};

    use super::*;

    fn style() -> PolylineStyle {
        PolylineStyle {
            color: LineColor::BLUE,
            width: 5.0,
        }
    }

    #[test]
    fn add_and_remove_round_trip() {
        let surface = HeadlessMapSurface::new();
        let line = vec![GeoLocation::downing_street(), GeoLocation::big_ben()];

        surface
            .add_polyline("step-source-0", "step-layer-0", &line, style())
            .expect("added");
        assert_eq!(surface.layer_ids(), vec!["step-layer-0"]);
        assert_eq!(surface.polyline("step-source-0"), Some(line));

        surface.remove_layer("step-layer-0").expect("removed");
        surface.remove_source("step-source-0").expect("removed");
        assert!(surface.layer_ids().is_empty());
        assert!(surface.source_ids().is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let surface = HeadlessMapSurface::new();
        let line = vec![GeoLocation::downing_street()];

        surface
            .add_polyline("step-source-0", "step-layer-0", &line, style())
            .expect("added");
        let result = surface.add_polyline("step-source-0", "step-layer-1", &line, style());
        assert!(matches!(result, Err(SurfaceError::Duplicate(_))));
    }

    #[test]
    fn removing_missing_ids_reports_not_found() {
        let surface = HeadlessMapSurface::new();
        assert!(matches!(
            surface.remove_layer("step-layer-9"),
            Err(SurfaceError::NotFound(_))
        ));
        assert!(matches!(
            surface.remove_source("step-source-9"),
            Err(SurfaceError::NotFound(_))
        ));
    }

    #[test]
    fn markers_and_camera_are_retained() {
        let surface = HeadlessMapSurface::new();

        surface
            .set_markers(
                "maneuver-markers",
                &[MarkerSpec {
                    location: GeoLocation::big_ben(),
                    label: "ARRIVE AT BIG BEN".to_string(),
                }],
            )
            .expect("markers set");
        assert_eq!(surface.markers("maneuver-markers").len(), 1);
        assert!(surface.markers("other-group").is_empty());

        surface
            .ease_camera(CameraRequest {
                target: CameraTarget::Center {
                    center: GeoLocation::london(),
                    zoom: 15.0,
                },
                duration: Duration::from_secs(1),
            })
            .expect("camera eased");
        assert!(surface.camera().is_some());
    }
}
