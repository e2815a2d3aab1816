//! Map rendering service
//!
//! Projects the current route state onto the map surface: one colored
//! polyline per step geometry, one labeled marker per maneuver, and a
//! camera move framing the route. Redraws are skipped when the route
//! fingerprint has not changed, and stale layers are always removed before
//! new ones are added.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::entities::Step;
use domain::value_objects::GeoLocation;
use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::{
    CameraRequest, CameraTarget, LineColor, MapSurfacePort, MarkerSpec, PolylineStyle,
    PositionFix, SurfaceError,
};
use crate::services::route_planner::RouteState;

/// Reserved id prefix for route polyline layers
pub const STEP_LAYER_PREFIX: &str = "step-layer-";
/// Reserved id prefix for route polyline sources
pub const STEP_SOURCE_PREFIX: &str = "step-source-";
/// Marker group holding the maneuver pins
pub const MANEUVER_MARKER_GROUP: &str = "maneuver-markers";

/// Renderer tuning
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Ordered polyline palette; the step at index `i` is drawn with
    /// `palette[i % palette.len()]`
    pub palette: Vec<LineColor>,
    /// Polyline stroke width in points
    pub line_width: f64,
    /// Camera animation duration
    pub camera_duration: Duration,
    /// Zoom level used when centering on the device position
    pub default_zoom: f64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            palette: vec![
                LineColor::BLUE,
                LineColor::GREEN,
                LineColor::RED,
                LineColor::YELLOW,
                LineColor::PURPLE,
            ],
            line_width: 5.0,
            camera_duration: Duration::from_secs(1),
            default_zoom: 15.0,
        }
    }
}

/// Service that redraws the map surface from route state
pub struct MapRenderer {
    surface: Arc<dyn MapSurfacePort>,
    config: RendererConfig,
    last_fingerprint: Mutex<Option<u64>>,
}

impl fmt::Debug for MapRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapRenderer")
            .field("config", &self.config)
            .field("last_fingerprint", &*self.last_fingerprint.lock())
            .finish_non_exhaustive()
    }
}

impl MapRenderer {
    /// Create a renderer over a surface
    #[must_use]
    pub fn new(surface: Arc<dyn MapSurfacePort>, config: RendererConfig) -> Self {
        Self {
            surface,
            config,
            last_fingerprint: Mutex::new(None),
        }
    }

    /// Redraw the surface so it shows exactly the steps of `state`
    ///
    /// Idempotent: when the state's fingerprint matches the last rendered
    /// one, no surface call is made. An empty step set clears the previous
    /// drawing and falls back to centering on the device position, when one
    /// is known.
    #[instrument(skip_all, fields(steps = state.steps().len()))]
    pub fn render(
        &self,
        state: &RouteState,
        device_position: Option<&PositionFix>,
    ) -> Result<(), ApplicationError> {
        if self.config.palette.is_empty() {
            return Err(ApplicationError::InvalidOperation(
                "renderer palette must not be empty".to_string(),
            ));
        }

        let fingerprint = state.fingerprint();
        let mut last = self.last_fingerprint.lock();
        if *last == Some(fingerprint) {
            debug!("Route steps unchanged, skipping redraw");
            return Ok(());
        }

        self.clear_stale()?;

        let steps = state.steps();
        if steps.is_empty() {
            self.surface.set_markers(MANEUVER_MARKER_GROUP, &[])?;
            if let Some(fix) = device_position {
                self.surface.ease_camera(CameraRequest {
                    target: CameraTarget::Center {
                        center: fix.location,
                        zoom: self.config.default_zoom,
                    },
                    duration: self.config.camera_duration,
                })?;
            }
            *last = Some(fingerprint);
            return Ok(());
        }

        self.draw_polylines(steps)?;
        let anchors = self.place_markers(steps)?;
        self.frame_route(&anchors)?;

        *last = Some(fingerprint);
        Ok(())
    }

    /// Remove every previously drawn route layer and source
    ///
    /// Guarantees no orphaned layers accumulate across redraws. A missing
    /// id only means there is nothing to remove.
    fn clear_stale(&self) -> Result<(), ApplicationError> {
        for id in self.surface.layer_ids() {
            if id.starts_with(STEP_LAYER_PREFIX) {
                ignore_missing(self.surface.remove_layer(&id))?;
            }
        }
        for id in self.surface.source_ids() {
            if id.starts_with(STEP_SOURCE_PREFIX) {
                ignore_missing(self.surface.remove_source(&id))?;
            }
        }
        Ok(())
    }

    /// Draw one polyline per step that carries geometry
    ///
    /// The color follows the step's position in the leg, so the same step
    /// index keeps the same color across redraws.
    fn draw_polylines(&self, steps: &[Step]) -> Result<(), ApplicationError> {
        for (index, step) in steps.iter().enumerate() {
            let Some(geometry) = &step.geometry else {
                continue;
            };
            let coordinates = geometry.decoded_coordinates();
            let color = self.config.palette[index % self.config.palette.len()];

            self.surface.add_polyline(
                &format!("{STEP_SOURCE_PREFIX}{index}"),
                &format!("{STEP_LAYER_PREFIX}{index}"),
                &coordinates,
                PolylineStyle {
                    color,
                    width: self.config.line_width,
                },
            )?;
        }
        Ok(())
    }

    /// Place one labeled pin per maneuver with a well-formed location
    ///
    /// Returns the pin positions in step order for camera framing.
    fn place_markers(&self, steps: &[Step]) -> Result<Vec<GeoLocation>, ApplicationError> {
        let mut anchors = Vec::new();
        let mut markers = Vec::new();
        for step in steps {
            let Some(location) = step.maneuver.coordinate() else {
                continue;
            };
            anchors.push(location);
            markers.push(MarkerSpec {
                location,
                label: step.maneuver.instruction.to_uppercase(),
            });
        }

        self.surface.set_markers(MANEUVER_MARKER_GROUP, &markers)?;
        Ok(anchors)
    }

    /// Ease the camera to frame the first and last maneuver pins
    ///
    /// With no pins to frame, the camera is left where it is.
    fn frame_route(&self, anchors: &[GeoLocation]) -> Result<(), ApplicationError> {
        let (Some(first), Some(last)) = (anchors.first(), anchors.last()) else {
            debug!("No maneuver pins to frame, leaving camera unchanged");
            return Ok(());
        };

        debug!(span_km = first.distance_km(last), "Framing route");
        self.surface
            .ease_camera(CameraRequest {
                target: CameraTarget::Bounds {
                    first: *first,
                    second: *last,
                },
                duration: self.config.camera_duration,
            })
            .map_err(ApplicationError::from)
    }
}

/// Treat a missing id as already removed
fn ignore_missing(result: Result<(), SurfaceError>) -> Result<(), ApplicationError> {
    match result {
        Err(SurfaceError::NotFound(id)) => {
            debug!(%id, "Nothing to remove");
            Ok(())
        }
        other => other.map_err(ApplicationError::from),
    }
}
