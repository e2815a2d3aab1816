//! Application services - The route pipeline

mod location_tracker;
mod map_renderer;
mod route_planner;

pub use location_tracker::LocationTracker;
pub use map_renderer::{
    MANEUVER_MARKER_GROUP, MapRenderer, RendererConfig, STEP_LAYER_PREFIX, STEP_SOURCE_PREFIX,
};
pub use route_planner::{RoutePlanner, RouteSnapshot, RouteState};
